use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Agent, AgentError, Coord, Termination, WorldMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    Success,
    Stuck,
    BudgetExhausted,
}

impl From<Termination> for Outcome {
    fn from(value: Termination) -> Self {
        match value {
            Termination::Success => Outcome::Success,
            Termination::Stuck => Outcome::Stuck,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => f.write_str("success"),
            Outcome::Stuck => f.write_str("stuck"),
            Outcome::BudgetExhausted => f.write_str("step budget exhausted"),
        }
    }
}

/// Summary of a finished (or budget-capped) run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunReport {
    pub outcome: Outcome,
    pub steps: u64,
    pub fact_count: usize,
    pub safe_count: usize,
    pub visited_count: usize,
    pub has_gold: bool,
    pub arrows_left: u32,
    pub position: Coord,
}

impl Agent {
    /// Step until the agent terminates or `max_steps` steps have been taken.
    pub fn run_steps<W>(&mut self, world: &mut W, max_steps: u64) -> Result<RunReport, AgentError>
    where
        W: WorldMut + ?Sized,
    {
        let mut taken = 0;
        while taken < max_steps && !self.goal().is_terminal() {
            self.step(world)?;
            taken += 1;
        }

        let outcome = self
            .goal()
            .termination()
            .map(Outcome::from)
            .unwrap_or(Outcome::BudgetExhausted);

        if outcome == Outcome::BudgetExhausted {
            tracing::warn!(max_steps, cell = %self.position(), "step budget exhausted");
        }

        Ok(self.report(outcome))
    }

    pub fn report(&self, outcome: Outcome) -> RunReport {
        RunReport {
            outcome,
            steps: self.steps_taken(),
            fact_count: self.knowledge().len(),
            safe_count: self.safe_cells().len(),
            visited_count: self.visited_cells().len(),
            has_gold: self.has_gold(),
            arrows_left: self.arrows(),
            position: self.position(),
        }
    }
}
