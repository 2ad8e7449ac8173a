use crate::Coord;

/// The forward trail from the start cell to the current position.
///
/// The top of the stack is always the agent's position and the bottom is always
/// the start cell; [`retreat`](Self::retreat) never pops the last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathHistory {
    trail: Vec<Coord>,
}

impl PathHistory {
    pub fn new(start: Coord) -> Self {
        Self { trail: vec![start] }
    }

    pub fn top(&self) -> Coord {
        // Never empty: seeded with the start cell and never popped below it.
        self.trail[self.trail.len() - 1]
    }

    /// The cell a retreat would return to.
    pub fn previous(&self) -> Option<Coord> {
        let n = self.trail.len();
        (n >= 2).then(|| self.trail[n - 2])
    }

    /// Push `to` unless it is already the top.
    pub fn advance(&mut self, to: Coord) {
        if self.top() != to {
            self.trail.push(to);
        }
    }

    /// Pop the top and return the new top, or `None` when only the start remains.
    pub fn retreat(&mut self) -> Option<Coord> {
        if self.trail.len() < 2 {
            return None;
        }
        self.trail.pop();
        Some(self.top())
    }

    /// Number of cells on the trail, start included.
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    pub fn as_slice(&self) -> &[Coord] {
        &self.trail
    }
}
