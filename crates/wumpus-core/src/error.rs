use thiserror::Error;

use crate::{Coord, Goal, Polarity, Proposition, Termination};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KbError {
    #[error("inconsistent fact: {prop} is held {held}, refusing to assert it {asserted}")]
    Inconsistent {
        prop: Proposition,
        held: Polarity,
        asserted: Polarity,
    },
}

/// Contract violations inside the agent. These indicate a bug in the decision
/// logic (or a caller driving `apply` by hand), never an environmental condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error(transparent)]
    Knowledge(#[from] KbError),

    #[error("attack charge already spent")]
    ChargeSpent,

    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Coord, to: Coord },

    #[error("cannot halt with {requested:?} while in {goal:?}")]
    IllegalHalt { requested: Termination, goal: Goal },
}
