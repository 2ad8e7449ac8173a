//! Percept interpretation: turns one observation into facts about the 4-neighbourhood.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Coord, Fact, Hazard, KbError, KnowledgeBase, Proposition};

/// What the agent senses on its current cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Percepts {
    /// The wumpus is in an adjacent cell.
    pub stench: bool,
    /// A pit is in an adjacent cell.
    pub breeze: bool,
    /// The gold lies on this cell.
    pub glitter: bool,
    pub bump: bool,
    pub scream: bool,
}

impl Percepts {
    pub fn signal(&self, hazard: Hazard) -> bool {
        match hazard {
            Hazard::Pit => self.breeze,
            Hazard::Wumpus => self.stench,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerceptUpdate {
    /// Facts newly added to the knowledge base.
    pub added: usize,
    pub gold_found: bool,
}

/// Assert what `percepts` at `here` prove.
///
/// No signal for a hazard proves every neighbour free of it; a signal is only
/// recorded at `here` and left to the deduction pass. Never asserts anything
/// about `here` except signal and glitter markers.
pub fn interpret(
    kb: &mut KnowledgeBase,
    here: Coord,
    neighbors: &[Coord],
    percepts: Percepts,
) -> Result<PerceptUpdate, KbError> {
    let mut update = PerceptUpdate::default();

    for hazard in [Hazard::Pit, Hazard::Wumpus] {
        if percepts.signal(hazard) {
            if kb.tell(Fact::holds(hazard.signal_at(here)))?.is_new() {
                update.added += 1;
            }
            continue;
        }

        for &n in neighbors {
            if kb.tell(Fact::not(hazard.at(n)))?.is_new() {
                update.added += 1;
            }
        }
    }

    if percepts.glitter {
        if kb.tell(Fact::holds(Proposition::Glitter(here)))?.is_new() {
            update.added += 1;
        }
        update.gold_found = true;
    }

    if percepts.bump || percepts.scream {
        tracing::debug!(
            cell = %here,
            bump = percepts.bump,
            scream = percepts.scream,
            "ignored percept channels"
        );
    }

    Ok(update)
}
