use std::collections::BTreeSet;

use crate::Coord;

/// Grow-only set of cells. Backs the safe and visited sets.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CellSet {
    cells: BTreeSet<Coord>,
}

impl CellSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `cell` was not already a member.
    pub fn insert(&mut self, cell: Coord) -> bool {
        self.cells.insert(cell)
    }

    pub fn contains(&self, cell: Coord) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }

    pub fn is_superset(&self, other: &CellSet) -> bool {
        self.cells.is_superset(&other.cells)
    }
}

impl FromIterator<Coord> for CellSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
