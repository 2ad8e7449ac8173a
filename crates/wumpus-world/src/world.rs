use wumpus_core::{coord, Arrow, Coord, Percepts, WorldMut, WorldView};

use crate::{LayoutError, WorldLayout};

/// Reference world: a static cave built from a [`WorldLayout`].
///
/// The wumpus never moves. One shot resolves it for good.
#[derive(Debug, Clone)]
pub struct WumpusWorld {
    layout: WorldLayout,
    wumpus_alive: bool,
    shots: u32,
}

impl WumpusWorld {
    pub fn new(layout: WorldLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        let wumpus_alive = layout.wumpus.is_some();
        Ok(Self {
            layout,
            wumpus_alive,
            shots: 0,
        })
    }

    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    pub fn start(&self) -> Coord {
        self.layout.start
    }

    pub fn wumpus_alive(&self) -> bool {
        self.wumpus_alive
    }

    /// Arrows resolved so far, hits and misses alike.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    fn adjacent(&self, at: Coord, cell: Coord) -> bool {
        coord::neighbors(at, self.layout.size).contains(&cell)
    }
}

impl WorldView for WumpusWorld {
    fn size(&self) -> i32 {
        self.layout.size
    }

    fn percepts(&self, at: Coord) -> Percepts {
        let stench = self.wumpus_alive
            && self.layout.wumpus.is_some_and(|w| self.adjacent(at, w));
        let breeze = self.layout.pits.iter().any(|&p| self.adjacent(at, p));

        Percepts {
            stench,
            breeze,
            glitter: self.layout.gold == Some(at),
            bump: false,
            scream: self.layout.wumpus.is_some() && !self.wumpus_alive,
        }
    }
}

impl WorldMut for WumpusWorld {
    fn attack(&mut self, _arrow: Arrow, target: Coord) -> bool {
        self.shots += 1;

        let hit = self.wumpus_alive && self.layout.wumpus == Some(target);
        if hit {
            self.wumpus_alive = false;
        }
        tracing::debug!(target = %target, hit, "arrow resolved");
        hit
    }
}
