use crate::geometry::{EPSILON, FloatType, Ray, WorldPoint};

use super::{BarycentricCoordinates, Triangle};

impl Triangle<WorldPoint> {
    /// Calculates ray intersection with the (two sided) triangle.
    /// Returns distance along the ray and barycentric uv coordinates, or None if the ray
    /// misses or is (nearly) parallel to the triangle's plane.
    /// The distance is not checked against any interval, it may be negative.
    /// Adapted from https://en.wikipedia.org/wiki/M%C3%B6ller%E2%80%93Trumbore_intersection_algorithm#Rust_implementation
    pub fn intersect(&self, ray: &Ray) -> Option<(FloatType, BarycentricCoordinates)> {
        let [e1, e2] = self.edges();

        let ray_cross_e2 = ray.direction.cross(&e2);
        let det = e1.dot(&ray_cross_e2);

        if det.abs() < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin - self[0];
        let u = inv_det * s.dot(&ray_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let s_cross_e1 = s.cross(&e1);
        let v = inv_det * ray.direction.dot(&s_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * e2.dot(&s_cross_e1);
        Some((t, BarycentricCoordinates { u, v }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{
        WorldVector,
        test::{RayWrapper, WorldPointWrapper},
    };

    use assert2::{assert, let_assert};
    use test_case::test_case;
    use test_strategy::proptest;

    fn test_triangle() -> Triangle<WorldPoint> {
        Triangle::new(
            WorldPoint::new(-1.0, -1.0, 0.0),
            WorldPoint::new(1.0, -1.0, 0.0),
            WorldPoint::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn straight_through_the_middle() {
        let r = Ray::new(
            WorldPoint::new(0.0, 0.0, -5.0),
            WorldVector::new(0.0, 0.0, 1.0),
        );
        let_assert!(Some((t, uv)) = test_triangle().intersect(&r));

        assert!(t == 5.0);
        assert!(uv == BarycentricCoordinates { u: 0.25, v: 0.5 });
        assert!(r.point_at(t) == WorldPoint::origin());
    }

    #[test]
    fn two_sided() {
        let r = Ray::new(
            WorldPoint::new(0.0, 0.0, 5.0),
            WorldVector::new(0.0, 0.0, -2.0),
        );
        let_assert!(Some((t, _)) = test_triangle().intersect(&r));

        assert!(t == 2.5);
    }

    #[test]
    fn behind_the_origin_is_negative() {
        let r = Ray::new(
            WorldPoint::new(0.0, 0.0, 5.0),
            WorldVector::new(0.0, 0.0, 1.0),
        );
        let_assert!(Some((t, _)) = test_triangle().intersect(&r));

        assert!(t == -5.0);
    }

    #[test_case(2.0, 0.0 ; "right_of_triangle")]
    #[test_case(0.0, 1.5 ; "above_apex")]
    #[test_case(0.0, -1.5 ; "below_base")]
    #[test_case(-0.9, 0.9 ; "beyond_left_edge")]
    fn misses(x: f64, y: f64) {
        let r = Ray::new(WorldPoint::new(x, y, -5.0), WorldVector::new(0.0, 0.0, 1.0));
        assert!(test_triangle().intersect(&r).is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let r = Ray::new(
            WorldPoint::new(-5.0, 0.0, 0.0),
            WorldVector::new(1.0, 0.0, 0.0),
        );
        assert!(test_triangle().intersect(&r).is_none());
    }

    #[test]
    fn degenerate_triangle_misses() {
        let t = Triangle::new(
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(1.0, 1.0, 0.0),
            WorldPoint::new(2.0, 2.0, 0.0),
        );
        let r = Ray::new(
            WorldPoint::new(1.0, 1.0, -1.0),
            WorldVector::new(0.0, 0.0, 1.0),
        );
        assert!(t.intersect(&r).is_none());
    }

    /// Any reported intersection lies in the triangle's plane at the reported uv.
    #[proptest]
    fn hit_lies_on_triangle(
        a: WorldPointWrapper,
        b: WorldPointWrapper,
        c: WorldPointWrapper,
        ray: RayWrapper,
    ) {
        let triangle = Triangle::new(*a, *b, *c);
        proptest::prop_assume!(triangle.normal().norm() > 1e-2);
        let Some((t, uv)) = triangle.intersect(&ray) else {
            return Ok(());
        };

        assert!(uv.is_inside());

        let p = ray.point_at(t);
        let on_triangle = uv.interpolate_triangle(&triangle);
        let scale = 10.0 + t.abs() * ray.direction().norm();
        assert!((p - on_triangle).norm() < 1e-6 * scale, "{p:?} vs {on_triangle:?}");

        let normal = triangle.normal().normalize();
        assert!((p - triangle[0]).dot(&normal).abs() < 1e-6 * scale);
    }

    /// A ray aimed at a point built from barycentric coordinates finds those coordinates again.
    #[proptest]
    fn aimed_ray_recovers_uv(
        origin: WorldPointWrapper,
        #[strategy(0.05f64..0.45)] u: f64,
        #[strategy(0.05f64..0.45)] v: f64,
    ) {
        let triangle = test_triangle();
        let target = BarycentricCoordinates { u, v }.interpolate_triangle(&triangle);
        let direction: WorldVector = target - *origin;
        proptest::prop_assume!(direction.z.abs() > 0.1);

        let r = Ray::new(*origin, direction);
        let_assert!(Some((t, uv)) = triangle.intersect(&r));

        assert!((t - 1.0).abs() < 1e-6);
        assert!((uv.u - u).abs() < 1e-6);
        assert!((uv.v - v).abs() < 1e-6);
    }
}
