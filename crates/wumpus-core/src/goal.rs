#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a run ended on its own (as opposed to running out of step budget).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Termination {
    /// Back on the start cell with the gold.
    Success,
    /// No safe move, attack or backtrack was left.
    Stuck,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Goal {
    #[default]
    SeekGold,
    ReturnHome,
    Terminated(Termination),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    GoldAcquired,
    ReachedHome,
    NoSafeAction,
}

impl Goal {
    /// The transition function. Pairs without a listed edge stay put, and
    /// `Terminated` absorbs everything.
    pub fn on(self, trigger: Trigger) -> Goal {
        match (self, trigger) {
            (Goal::Terminated(t), _) => Goal::Terminated(t),
            (Goal::SeekGold, Trigger::GoldAcquired) => Goal::ReturnHome,
            (Goal::ReturnHome, Trigger::ReachedHome) => Goal::Terminated(Termination::Success),
            (_, Trigger::NoSafeAction) => Goal::Terminated(Termination::Stuck),
            (goal, _) => goal,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Goal::Terminated(_))
    }

    pub fn termination(self) -> Option<Termination> {
        match self {
            Goal::Terminated(t) => Some(t),
            _ => None,
        }
    }
}

impl Termination {
    pub fn trigger(self) -> Trigger {
        match self {
            Termination::Success => Trigger::ReachedHome,
            Termination::Stuck => Trigger::NoSafeAction,
        }
    }
}
