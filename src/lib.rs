pub mod geometry;
pub mod scene;
pub mod util;

pub use geometry::{BoxIntervalPolicy, HitRecord, Ray};
pub use scene::{FlatTriangle, HittableList, Object, Sphere, TriangleBvh};
