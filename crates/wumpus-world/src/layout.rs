//! Static world layout: where the hazards and the gold are.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use wumpus_core::Coord;

/// Largest grid accepted from configuration.
pub const MAX_SIZE: i32 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("grid size must be between 1 and {MAX_SIZE}, got {0}")]
    BadSize(i32),

    #[error("{what} at {at} is outside the {size}x{size} grid")]
    OutOfBounds {
        what: &'static str,
        at: Coord,
        size: i32,
    },

    #[error("{what} placed on the start cell {at}")]
    HazardOnStart { what: &'static str, at: Coord },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    /// Side length; cells are `1..=size` on both axes.
    pub size: i32,

    /// Agent start cell
    pub start: Coord,

    /// `None` means there is no wumpus at all.
    pub wumpus: Option<Coord>,

    pub gold: Option<Coord>,

    pub pits: Vec<Coord>,
}

impl Default for WorldLayout {
    /// The classic 4x4 reference cave.
    fn default() -> Self {
        Self {
            size: 4,
            start: Coord::new(1, 1),
            wumpus: Some(Coord::new(1, 3)),
            gold: Some(Coord::new(2, 3)),
            pits: vec![Coord::new(3, 1), Coord::new(3, 3), Coord::new(4, 4)],
        }
    }
}

impl WorldLayout {
    /// An empty `size`x`size` cave starting at (1,1).
    pub fn empty(size: i32) -> Self {
        Self {
            size,
            start: Coord::new(1, 1),
            wumpus: None,
            gold: None,
            pits: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(1..=MAX_SIZE).contains(&self.size) {
            return Err(LayoutError::BadSize(self.size));
        }

        let mut placed = vec![("start", self.start)];
        placed.extend(self.wumpus.map(|w| ("wumpus", w)));
        placed.extend(self.gold.map(|g| ("gold", g)));
        placed.extend(self.pits.iter().map(|&p| ("pit", p)));

        for (what, at) in placed {
            if !at.in_bounds(self.size) {
                return Err(LayoutError::OutOfBounds {
                    what,
                    at,
                    size: self.size,
                });
            }
        }

        if self.wumpus == Some(self.start) {
            return Err(LayoutError::HazardOnStart {
                what: "wumpus",
                at: self.start,
            });
        }
        if self.pits.contains(&self.start) {
            return Err(LayoutError::HazardOnStart {
                what: "pit",
                at: self.start,
            });
        }

        Ok(())
    }

    pub fn is_pit(&self, at: Coord) -> bool {
        self.pits.contains(&at)
    }
}
