use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A grid cell, 1-indexed on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self, size: i32) -> bool {
        self.x >= 1 && self.y >= 1 && self.x <= size && self.y <= size
    }

    pub fn is_adjacent(self, other: Coord) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// In-bounds 4-neighbourhood of `at` on a `size`x`size` grid.
///
/// Fixed order for determinism: decreasing x, increasing x, decreasing y, increasing y.
pub fn neighbors(at: Coord, size: i32) -> Vec<Coord> {
    [
        Coord::new(at.x - 1, at.y),
        Coord::new(at.x + 1, at.y),
        Coord::new(at.x, at.y - 1),
        Coord::new(at.x, at.y + 1),
    ]
    .into_iter()
    .filter(|c| c.in_bounds(size))
    .collect()
}

/// Every cell of a `size`x`size` grid, x-major.
pub fn cells(size: i32) -> impl Iterator<Item = Coord> {
    (1..=size).flat_map(move |x| (1..=size).map(move |y| Coord::new(x, y)))
}
