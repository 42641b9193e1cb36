use assert2::debug_assert;

use super::{WorldBox, WorldPoint};

/// Axis aligned box.
/// Users are expected to keep `min <= max` on every axis, nothing here repairs it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AABB<Point> {
    pub min: Point,
    pub max: Point,
}

impl<Point> AABB<Point> {
    pub fn new(min: Point, max: Point) -> AABB<Point> {
        AABB { min, max }
    }
}

impl WorldBox {
    /// Box with zero size, located at the origin.
    pub fn degenerate() -> WorldBox {
        WorldBox::new(WorldPoint::origin(), WorldPoint::origin())
    }

    /// Smallest box containing all the points, None if there are no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a WorldPoint>) -> Option<WorldBox> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.inf(p), max.sup(p)));

        Some(WorldBox { min, max })
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &WorldBox) -> WorldBox {
        debug_assert!(self.is_valid() && other.is_valid());
        WorldBox {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    pub fn contains_box(&self, other: &WorldBox) -> bool {
        (0..3).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }

    pub fn is_valid(&self) -> bool {
        (0..3).all(|i| self.min[i] <= self.max[i])
    }
}
