//! Room geometry.

use serde::{Deserialize, Serialize};

use super::grid::Point;
use crate::rng::GenRng;

/// Room identity, unique and 1-based, assigned once placement succeeds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoomId(pub u32);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// Rectangular room interior; immutable after placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// X coordinate of the interior's left edge
    pub x: usize,
    /// Y coordinate of the interior's top edge
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn new(id: RoomId, x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
        }
    }

    /// Rightmost interior column
    pub fn right(&self) -> usize {
        self.x + self.width - 1
    }

    /// Bottom interior row
    pub fn bottom(&self) -> usize {
        self.y + self.height - 1
    }

    /// Center point of the interior
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Squared center-to-center distance; squared order equals true order
    pub fn center_distance_sq(&self, other: &Room) -> u64 {
        let a = self.center();
        let b = other.center();
        let dx = a.x as i64 - b.x as i64;
        let dy = a.y as i64 - b.y as i64;
        (dx * dx + dy * dy) as u64
    }

    /// Check if a point lies on the interior floor
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Check if a point lies inside the bounding box expanded by one wall cell
    pub fn bordered_contains(&self, p: Point) -> bool {
        p.x + 1 >= self.x
            && p.x <= self.right() + 1
            && p.y + 1 >= self.y
            && p.y <= self.bottom() + 1
    }

    /// Check if the 1-expanded bounding boxes of two rooms intersect
    pub fn overlaps_bordered(&self, other: &Room) -> bool {
        !(other.right() + 2 < self.x
            || other.x > self.right() + 2
            || other.bottom() + 2 < self.y
            || other.y > self.bottom() + 2)
    }

    /// A uniformly random interior floor point
    pub fn random_point(&self, rng: &mut GenRng) -> Point {
        Point::new(
            rng.range(self.x, self.right()),
            rng.range(self.y, self.bottom()),
        )
    }
}
