mod hittable_list;
pub mod primitives;
pub mod triangle_bvh;

pub use hittable_list::HittableList;
pub use primitives::{FlatTriangle, Sphere};
pub use triangle_bvh::TriangleBvh;

use crate::geometry::{FloatType, HitRecord, Ray, WorldBox};

/// Renderable object
pub trait Object {
    /// Nearest intersection with t strictly inside (t_min, t_max).
    fn intersect(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<HitRecord>;
    fn get_bounding_box(&self) -> WorldBox;
}

/// Intersects every object, narrowing the interval after each hit.
/// Starts from `best`, objects only replace it with strictly nearer hits.
pub fn intersect_nearest<'a, O: Object + 'a>(
    objects: impl IntoIterator<Item = &'a O>,
    ray: &Ray,
    t_min: FloatType,
    t_max: FloatType,
    best: Option<HitRecord>,
) -> Option<HitRecord> {
    objects.into_iter().fold(best, |best, object| {
        let closest_so_far = best.as_ref().map_or(t_max, |hit| hit.t);
        match object.intersect(ray, t_min, closest_so_far) {
            Some(hit) => Some(hit.nearer(best)),
            None => best,
        }
    })
}
