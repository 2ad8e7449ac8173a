use crate::{coord, Arrow, Coord, Percepts};

/// Read-only world access.
///
/// The core never reaches into a world's internals: everything it learns comes
/// through these queries.
pub trait WorldView {
    /// Side length of the (square) grid. Valid coordinates are `1..=size`.
    fn size(&self) -> i32;

    /// In-bounds neighbours of `at`, in a stable order.
    fn neighbors(&self, at: Coord) -> Vec<Coord> {
        coord::neighbors(at, self.size())
    }

    fn percepts(&self, at: Coord) -> Percepts;
}

/// Effect sink for the agent's offensive action.
pub trait WorldMut: WorldView {
    /// Resolve a shot at `target`, consuming `arrow`. Returns `true` on a hit.
    ///
    /// Shooting once the wumpus is already dead is a no-op returning `false`.
    fn attack(&mut self, arrow: Arrow, target: Coord) -> bool;
}
