use bon::bon;

use crate::geometry::{BoxIntervalPolicy, FloatType, HitRecord, Ray, WorldBox};

use super::{Object, Sphere, TriangleBvh, intersect_nearest};

/// Spheres scanned one by one, plus all the triangle geometry in a single hierarchy.
#[derive(Clone, Debug)]
pub struct HittableList {
    spheres: Vec<Sphere>,
    bvh: TriangleBvh,
    box_interval_policy: BoxIntervalPolicy,
}

#[bon]
impl HittableList {
    #[builder]
    pub fn new(
        #[builder(default)] spheres: Vec<Sphere>,
        #[builder(default)] bvh: TriangleBvh,
        #[builder(default)] box_interval_policy: BoxIntervalPolicy,
    ) -> Self {
        HittableList {
            spheres,
            bvh,
            box_interval_policy,
        }
    }
}

impl HittableList {
    /// Finds the nearest sphere or triangle hit with t strictly inside (t_min, t_max).
    pub fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<HitRecord> {
        let best = intersect_nearest(&self.spheres, ray, t_min, t_max, None);

        let closest_so_far = best.as_ref().map_or(t_max, |hit| hit.t);
        let candidates =
            self.bvh
                .candidate_leaf_pairs(ray, t_min, closest_so_far, self.box_interval_policy);
        let triangles = candidates
            .into_iter()
            .flat_map(|pair| pair.iter())
            .flat_map(|leaf| leaf.triangles.iter());

        intersect_nearest(triangles, ray, t_min, t_max, best)
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn bvh(&self) -> &TriangleBvh {
        &self.bvh
    }

    pub fn box_interval_policy(&self) -> BoxIntervalPolicy {
        self.box_interval_policy
    }
}

impl Object for HittableList {
    fn intersect(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<HitRecord> {
        self.hit(ray, t_min, t_max)
    }

    fn get_bounding_box(&self) -> WorldBox {
        let triangle_bounds = self
            .bvh
            .triangles()
            .next()
            .map(|_| self.bvh.root().bounds().clone());

        self.spheres
            .iter()
            .map(|sphere| sphere.get_bounding_box())
            .chain(triangle_bounds)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(WorldBox::degenerate)
    }
}
