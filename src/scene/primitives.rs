use crate::geometry::{
    FloatType, HitRecord, MaterialId, Ray, Triangle, WorldBox, WorldPoint, WorldVector,
};

use super::Object;

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: WorldPoint,
    pub radius: FloatType,
    pub material: MaterialId,
}

impl Object for Sphere {
    /// Tangent rays (discriminant exactly zero) count as a miss.
    fn intersect(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<HitRecord> {
        let direction = ray.direction();
        let oc = ray.origin() - self.center;
        let a = direction.dot(&direction);
        let half_b = oc.dot(&direction);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;

        if discriminant <= 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = (-half_b - sqrt_disc) / a;
        let t2 = (-half_b + sqrt_disc) / a;
        let t = [t1, t2].into_iter().find(|t| t_min < *t && *t < t_max)?;

        let point = ray.point_at(t);
        let normal = (point - self.center) / self.radius;

        Some(HitRecord {
            t,
            point,
            normal,
            material: self.material,
        })
    }

    fn get_bounding_box(&self) -> WorldBox {
        let r_vec = WorldVector::repeat(self.radius.abs());
        WorldBox {
            min: self.center - r_vec,
            max: self.center + r_vec,
        }
    }
}

/// Triangle with a single normal used for the whole face.
#[derive(Clone, Debug)]
pub struct FlatTriangle {
    pub vertices: Triangle<WorldPoint>,
    /// Reported as the hit normal as is, never recomputed from the vertices.
    pub normal: WorldVector,
    pub material: MaterialId,
}

impl FlatTriangle {
    pub fn new(vertices: Triangle<WorldPoint>, normal: WorldVector, material: MaterialId) -> Self {
        FlatTriangle {
            vertices,
            normal,
            material,
        }
    }

    /// Uses the normalized geometric normal (counter clockwise winding) as the face normal.
    pub fn with_geometric_normal(vertices: Triangle<WorldPoint>, material: MaterialId) -> Self {
        let normal = vertices
            .normal()
            .try_normalize(0.0)
            .unwrap_or_else(WorldVector::zeros);
        FlatTriangle::new(vertices, normal, material)
    }
}

impl Object for FlatTriangle {
    fn intersect(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<HitRecord> {
        let (t, _uv) = self.vertices.intersect(ray)?;
        if !(t_min < t && t < t_max) {
            return None;
        }

        Some(HitRecord {
            t,
            point: ray.point_at(t),
            normal: self.normal,
            material: self.material,
        })
    }

    fn get_bounding_box(&self) -> WorldBox {
        WorldBox::from_points(self.vertices.iter()).unwrap_or_else(WorldBox::degenerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test::{RayWrapper, WorldPointWrapper};

    use assert2::{assert, let_assert};
    use test_case::test_case;
    use test_strategy::proptest;

    fn unit_sphere() -> Sphere {
        Sphere {
            center: WorldPoint::origin(),
            radius: 1.0,
            material: 7,
        }
    }

    fn test_triangle() -> FlatTriangle {
        FlatTriangle::new(
            Triangle::new(
                WorldPoint::new(-1.0, -1.0, 0.0),
                WorldPoint::new(1.0, -1.0, 0.0),
                WorldPoint::new(0.0, 1.0, 0.0),
            ),
            WorldVector::new(0.0, 1.0, 0.0),
            3,
        )
    }

    #[test]
    fn direct_hit_through_center() {
        let ray = Ray::new([0.0, 0.0, -5.0].into(), [0.0, 0.0, 1.0].into());
        let_assert!(Some(h) = unit_sphere().intersect(&ray, 0.0, FloatType::INFINITY));

        assert!(h.t == 4.0);
        assert!(h.point == WorldPoint::new(0.0, 0.0, -1.0));
        assert!(h.normal == WorldVector::new(0.0, 0.0, -1.0));
        assert!(h.material == 7);
    }

    #[test]
    fn unnormalized_direction_scales_t() {
        let ray = Ray::new([0.0, 0.0, -5.0].into(), [0.0, 0.0, 2.0].into());
        let_assert!(Some(h) = unit_sphere().intersect(&ray, 0.0, FloatType::INFINITY));

        assert!(h.t == 2.0);
        assert!(h.point == WorldPoint::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn far_root_when_near_root_is_outside_interval() {
        let ray = Ray::new([0.0, 0.0, -5.0].into(), [0.0, 0.0, 1.0].into());
        let_assert!(Some(h) = unit_sphere().intersect(&ray, 4.5, FloatType::INFINITY));

        assert!(h.t == 6.0);
        assert!(h.normal == WorldVector::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn from_inside_hits_far_side() {
        let ray = Ray::new(WorldPoint::origin(), [1.0, 0.0, 0.0].into());
        let_assert!(Some(h) = unit_sphere().intersect(&ray, 1e-3, FloatType::INFINITY));

        assert!(h.t == 1.0);
        assert!(h.normal == WorldVector::new(1.0, 0.0, 0.0));
    }

    #[test_case(0.0, 4.0 ; "interval_ends_at_near_root")]
    #[test_case(6.0, 10.0 ; "interval_starts_at_far_root")]
    #[test_case(4.2, 5.8 ; "interval_between_roots")]
    #[test_case(-10.0, -1.0 ; "sphere_behind")]
    fn interval_excludes_both_roots(t_min: f64, t_max: f64) {
        let ray = Ray::new([0.0, 0.0, -5.0].into(), [0.0, 0.0, 1.0].into());
        assert!(unit_sphere().intersect(&ray, t_min, t_max).is_none());
    }

    #[test]
    fn tangent_ray_misses() {
        let ray = Ray::new([1.0, 0.0, -5.0].into(), [0.0, 0.0, 1.0].into());
        assert!(unit_sphere().intersect(&ray, 0.0, FloatType::INFINITY).is_none());
    }

    #[test]
    fn narrow_miss() {
        let ray = Ray::new([1.0, 0.01, -5.0].into(), [0.0, 0.0, 1.0].into());
        assert!(unit_sphere().intersect(&ray, 0.0, FloatType::INFINITY).is_none());
    }

    #[test]
    fn sphere_bounding_box() {
        let sphere = Sphere {
            center: [1.0, 2.0, 3.0].into(),
            radius: 0.5,
            material: 0,
        };
        assert!(
            sphere.get_bounding_box()
                == WorldBox::new([0.5, 1.5, 2.5].into(), [1.5, 2.5, 3.5].into())
        );
    }

    /// Sphere hits lie on the surface, and the near root is taken whenever it is in the interval.
    #[proptest]
    fn sphere_hit_on_surface(
        center: WorldPointWrapper,
        #[strategy(0.1f64..5.0)] radius: f64,
        ray: RayWrapper,
    ) {
        let sphere = Sphere {
            center: *center,
            radius,
            material: 1,
        };
        let Some(hit) = sphere.intersect(&ray, 1e-6, FloatType::INFINITY) else {
            return Ok(());
        };

        let distance = (hit.point - sphere.center).norm();
        assert!((distance - radius).abs() < 1e-6 * (1.0 + radius));
        assert!((hit.normal.norm() - 1.0).abs() < 1e-6);

        // Nothing nearer than the hit may be accepted on a tighter interval
        assert!(sphere.intersect(&ray, 1e-6, hit.t).is_none());
    }

    #[test]
    fn triangle_hit_uses_stored_normal() {
        let ray = Ray::new([0.0, 0.0, -5.0].into(), [0.0, 0.0, 1.0].into());
        let_assert!(Some(h) = test_triangle().intersect(&ray, 0.0, FloatType::INFINITY));

        assert!(h.t == 5.0);
        assert!(h.point == WorldPoint::origin());
        assert!(h.normal == WorldVector::new(0.0, 1.0, 0.0));
        assert!(h.material == 3);
    }

    #[test_case(0.0, 5.0 ; "interval_ends_at_hit")]
    #[test_case(5.0, 10.0 ; "interval_starts_at_hit")]
    #[test_case(-10.0, 0.0 ; "triangle_ahead")]
    fn triangle_outside_interval(t_min: f64, t_max: f64) {
        let ray = Ray::new([0.0, 0.0, -5.0].into(), [0.0, 0.0, 1.0].into());
        assert!(test_triangle().intersect(&ray, t_min, t_max).is_none());
    }

    #[test]
    fn triangle_behind_origin_misses() {
        let ray = Ray::new([0.0, 0.0, 5.0].into(), [0.0, 0.0, 1.0].into());
        assert!(test_triangle().intersect(&ray, 0.0, FloatType::INFINITY).is_none());
    }

    #[test]
    fn geometric_normal_is_unit() {
        let t = FlatTriangle::with_geometric_normal(test_triangle().vertices, 0);
        assert!(t.normal == WorldVector::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn triangle_bounding_box() {
        assert!(
            test_triangle().get_bounding_box()
                == WorldBox::new([-1.0, -1.0, 0.0].into(), [1.0, 1.0, 0.0].into())
        );
    }
}
