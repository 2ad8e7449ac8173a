//! Typed proposition store.
//!
//! Facts are keyed by [`Proposition`] and hold exactly one [`Polarity`], so a
//! proposition can never be believed both ways at once. Asserting the opposite
//! polarity of a held fact is an error, not an overwrite.

use core::fmt;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Coord, KbError};

/// Hazard classes the agent reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hazard {
    Pit,
    Wumpus,
}

impl Hazard {
    /// The hazard-presence proposition at `at`.
    pub fn at(self, at: Coord) -> Proposition {
        match self {
            Hazard::Pit => Proposition::Pit(at),
            Hazard::Wumpus => Proposition::Wumpus(at),
        }
    }

    /// The proposition recording that this hazard's signal was sensed at `at`.
    pub fn signal_at(self, at: Coord) -> Proposition {
        match self {
            Hazard::Pit => Proposition::Breeze(at),
            Hazard::Wumpus => Proposition::Stench(at),
        }
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hazard::Pit => f.write_str("pit"),
            Hazard::Wumpus => f.write_str("wumpus"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Proposition {
    Pit(Coord),
    Wumpus(Coord),
    Breeze(Coord),
    Stench(Coord),
    Glitter(Coord),
    Safe(Coord),
    WumpusAlive,
}

impl Proposition {
    pub fn cell(self) -> Option<Coord> {
        match self {
            Proposition::Pit(c)
            | Proposition::Wumpus(c)
            | Proposition::Breeze(c)
            | Proposition::Stench(c)
            | Proposition::Glitter(c)
            | Proposition::Safe(c) => Some(c),
            Proposition::WumpusAlive => None,
        }
    }

    /// The hazard this proposition is a signal for, if it is one.
    pub fn signal_of(self) -> Option<Hazard> {
        match self {
            Proposition::Breeze(_) => Some(Hazard::Pit),
            Proposition::Stench(_) => Some(Hazard::Wumpus),
            _ => None,
        }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proposition::Pit(c) => write!(f, "Pit{c}"),
            Proposition::Wumpus(c) => write!(f, "Wumpus{c}"),
            Proposition::Breeze(c) => write!(f, "Breeze{c}"),
            Proposition::Stench(c) => write!(f, "Stench{c}"),
            Proposition::Glitter(c) => write!(f, "Glitter{c}"),
            Proposition::Safe(c) => write!(f, "Safe{c}"),
            Proposition::WumpusAlive => f.write_str("WumpusAlive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    Positive,
    Negative,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => f.write_str("positive"),
            Polarity::Negative => f.write_str("negative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fact {
    pub prop: Proposition,
    pub polarity: Polarity,
}

impl Fact {
    pub const fn holds(prop: Proposition) -> Self {
        Self {
            prop,
            polarity: Polarity::Positive,
        }
    }

    pub const fn not(prop: Proposition) -> Self {
        Self {
            prop,
            polarity: Polarity::Negative,
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.polarity {
            Polarity::Positive => write!(f, "{}", self.prop),
            Polarity::Negative => write!(f, "~{}", self.prop),
        }
    }
}

/// Result of a successful [`KnowledgeBase::tell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Told {
    Added,
    AlreadyKnown,
}

impl Told {
    pub fn is_new(self) -> bool {
        self == Told::Added
    }
}

#[derive(Debug, Default, Clone)]
pub struct KnowledgeBase {
    facts: BTreeMap<Proposition, Polarity>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tell(&mut self, fact: Fact) -> Result<Told, KbError> {
        match self.facts.get(&fact.prop) {
            Some(&held) if held == fact.polarity => {
                tracing::trace!(fact = %fact, "fact already known");
                Ok(Told::AlreadyKnown)
            }
            Some(&held) => Err(KbError::Inconsistent {
                prop: fact.prop,
                held,
                asserted: fact.polarity,
            }),
            None => {
                self.facts.insert(fact.prop, fact.polarity);
                tracing::debug!(fact = %fact, "tell");
                Ok(Told::Added)
            }
        }
    }

    /// Closed-world query: unknown facts are false, in either polarity.
    pub fn ask(&self, fact: Fact) -> bool {
        self.facts.get(&fact.prop) == Some(&fact.polarity)
    }

    pub fn polarity(&self, prop: Proposition) -> Option<Polarity> {
        self.facts.get(&prop).copied()
    }

    pub fn is_known(&self, prop: Proposition) -> bool {
        self.facts.contains_key(&prop)
    }

    /// Remove every fact matching `pred`, returning how many were dropped.
    pub fn retract_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&Fact) -> bool,
    {
        let before = self.facts.len();
        self.facts.retain(|&prop, &mut polarity| {
            let fact = Fact { prop, polarity };
            let drop = pred(&fact);
            if drop {
                tracing::debug!(fact = %fact, "retract");
            }
            !drop
        });
        before - self.facts.len()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Fact> + '_ {
        self.facts
            .iter()
            .map(|(&prop, &polarity)| Fact { prop, polarity })
    }

    /// Positive signal facts (breeze/stench), in proposition order.
    pub fn signals(&self) -> impl Iterator<Item = (Hazard, Coord)> + '_ {
        self.iter().filter_map(|fact| {
            if fact.polarity != Polarity::Positive {
                return None;
            }
            Some((fact.prop.signal_of()?, fact.prop.cell()?))
        })
    }

    /// First cell (in coordinate order) where `hazard` is believed present.
    pub fn located(&self, hazard: Hazard) -> Option<Coord> {
        self.iter().find_map(|fact| match (hazard, fact.prop, fact.polarity) {
            (Hazard::Pit, Proposition::Pit(c), Polarity::Positive)
            | (Hazard::Wumpus, Proposition::Wumpus(c), Polarity::Positive) => Some(c),
            _ => None,
        })
    }
}
