mod aabb;
mod ray_box_intersection;
mod ray_triangle_intersection;
mod triangle;

pub use aabb::AABB;
pub use ray_box_intersection::{BoxIntervalPolicy, RayIntersectionExt};
pub use triangle::{BarycentricCoordinates, Triangle};

pub type FloatType = f64;
pub type WorldPoint = nalgebra::Point3<FloatType>;
pub type WorldVector = nalgebra::Vector3<FloatType>;
pub type WorldBox = AABB<WorldPoint>;

/// Index into a material table owned by whoever shades the hits.
pub type MaterialId = usize;

/// Tolerance used to reject rays (nearly) parallel to a triangle's plane.
pub const EPSILON: FloatType = 1e-5;

/// Half line from `origin` along `direction`.
/// Rays are immutable once built by `Ray::new`, the cached inverse direction always
/// belongs to the stored direction.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    origin: WorldPoint,
    /// Direction of the ray, not normalized.
    /// Distances along the ray are measured in multiples of its length.
    direction: WorldVector,

    /// Componentwise inverse of the ray direction.
    /// Zero components turn into infinities with the sign of the zero.
    inv_direction: WorldVector,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        let inv_direction = direction.map(|x| 1.0 / x);

        Ray {
            origin,
            direction,
            inv_direction,
        }
    }

    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    pub fn direction(&self) -> WorldVector {
        self.direction
    }

    pub fn point_at(&self, t: FloatType) -> WorldPoint {
        self.origin + self.direction * t
    }
}

/// Where and how a ray struck a surface.
/// All fields always describe the same point.
#[derive(Clone, Debug, PartialEq)]
pub struct HitRecord {
    /// Distance along the ray, in multiples of ray direction length
    pub t: FloatType,
    pub point: WorldPoint,
    pub normal: WorldVector,
    pub material: MaterialId,
}

impl HitRecord {
    /// Returns the nearer of two optional hits, preferring `self` on ties.
    pub fn nearer(self, other: Option<HitRecord>) -> HitRecord {
        match other {
            Some(other) if other.t < self.t => other,
            _ => self,
        }
    }
}
