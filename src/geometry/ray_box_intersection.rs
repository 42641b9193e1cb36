use crate::geometry::{FloatType, Ray, WorldBox};

/// How the box gate treats the parametric interval passed by its caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BoxIntervalPolicy {
    /// The caller's interval is ignored; the box is only rejected when it lies entirely
    /// behind the ray origin or the ray misses it.
    /// All real interval checks happen in the primitive tests.
    #[default]
    IgnoreInterval,
    /// The box's slab interval is intersected with the caller's interval before the test.
    ClipToInterval,
}

impl BoxIntervalPolicy {
    pub fn test(self, b: &WorldBox, ray: &Ray, t_min: FloatType, t_max: FloatType) -> bool {
        match self {
            BoxIntervalPolicy::IgnoreInterval => b.hit(ray, t_min, t_max),
            BoxIntervalPolicy::ClipToInterval => b.hit_clipped(ray, t_min, t_max),
        }
    }
}

pub trait RayIntersectionExt {
    /// Calculate first and last ray intersection with the box
    fn intersect(&self, ray: &Ray) -> (FloatType, FloatType);

    /// Coarse gate: does the ray pass through the box anywhere in front of its origin.
    /// `t_min` and `t_max` are accepted for symmetry with the primitive tests but are not used.
    fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> bool;

    /// Does the ray pass through the box within (t_min, t_max).
    fn hit_clipped(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> bool;
}

impl RayIntersectionExt for WorldBox {
    /// Calculates ray intersection with the box.
    /// Returns minimum and maximum distance along the ray, ray intersects if min <= max.
    fn intersect(&self, ray: &Ray) -> (FloatType, FloatType) {
        // Componentwise distances along the ray to the box's min and max corners.
        // The multiplication is NAN if the ray is starting inside the slab bounding plane
        // and is parallel to it. In this case we replace it with +-infinity, so that the range
        // becomes infinite
        let to_box_min = (self.min - ray.origin)
            .component_mul(&ray.inv_direction)
            .map(|x| if x.is_nan() { FloatType::NEG_INFINITY } else { x });
        let to_box_max = (self.max - ray.origin)
            .component_mul(&ray.inv_direction)
            .map(|x| if x.is_nan() { FloatType::INFINITY } else { x });

        // Correctly ordered (min_t <= max_t)
        let componentwise_min_t = to_box_min.zip_map(&to_box_max, |a, b| a.min(b));
        let componentwise_max_t = to_box_min.zip_map(&to_box_max, |a, b| a.max(b));

        let min_t = componentwise_min_t.max();
        let max_t = componentwise_max_t.min();

        (min_t, max_t)
    }

    fn hit(&self, ray: &Ray, _t_min: FloatType, _t_max: FloatType) -> bool {
        let (min_t, max_t) = self.intersect(ray);
        max_t >= 0.0 && min_t <= max_t
    }

    fn hit_clipped(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> bool {
        let (min_t, max_t) = self.intersect(ray);
        min_t.max(t_min) <= max_t.min(t_max)
    }
}
