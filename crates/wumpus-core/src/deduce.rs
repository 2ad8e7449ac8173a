//! Grid-wide deduction over the accumulated facts.
//!
//! Two passes, re-run every step:
//!
//! - **safety**: a cell is safe once both `~Pit` and `~Wumpus` are held for it.
//! - **localization**: for each sensed breeze/stench, the neighbours whose
//!   hazard status is still unknown are the *candidates*. When exactly one is
//!   left, the hazard must be there. Signals already explained by a known
//!   hazard next to them are skipped.

use crate::{
    coord, CellSet, Coord, Fact, Hazard, KbError, KnowledgeBase, Polarity, Proposition, WorldView,
};

/// What a single deduction round learned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deductions {
    pub newly_safe: Vec<Coord>,
    pub located: Vec<(Hazard, Coord)>,
}

impl Deductions {
    pub fn is_empty(&self) -> bool {
        self.newly_safe.is_empty() && self.located.is_empty()
    }
}

pub fn deduce<W>(
    kb: &mut KnowledgeBase,
    world: &W,
    safe: &mut CellSet,
) -> Result<Deductions, KbError>
where
    W: WorldView + ?Sized,
{
    let mut out = Deductions::default();
    safety_pass(kb, world.size(), safe, &mut out)?;
    localization_pass(kb, world, &mut out)?;
    Ok(out)
}

/// Proven absent from `cell`, for both hazards.
pub fn proven_safe(kb: &KnowledgeBase, cell: Coord) -> bool {
    kb.ask(Fact::not(Proposition::Pit(cell))) && kb.ask(Fact::not(Proposition::Wumpus(cell)))
}

fn safety_pass(
    kb: &mut KnowledgeBase,
    size: i32,
    safe: &mut CellSet,
    out: &mut Deductions,
) -> Result<(), KbError> {
    for cell in coord::cells(size) {
        if safe.contains(cell) || !proven_safe(kb, cell) {
            continue;
        }
        safe.insert(cell);
        kb.tell(Fact::holds(Proposition::Safe(cell)))?;
        tracing::info!(cell = %cell, "inferred safe");
        out.newly_safe.push(cell);
    }
    Ok(())
}

/// Neighbours of `signal_at` whose `hazard` status is still open, or `None`
/// when the signal is already explained by a neighbour known to hold it.
pub fn candidates<W>(
    kb: &KnowledgeBase,
    world: &W,
    hazard: Hazard,
    signal_at: Coord,
) -> Option<Vec<Coord>>
where
    W: WorldView + ?Sized,
{
    let mut open = Vec::new();
    for n in world.neighbors(signal_at) {
        match kb.polarity(hazard.at(n)) {
            Some(Polarity::Positive) => return None,
            Some(Polarity::Negative) => {}
            None => open.push(n),
        }
    }
    Some(open)
}

fn localization_pass<W>(
    kb: &mut KnowledgeBase,
    world: &W,
    out: &mut Deductions,
) -> Result<(), KbError>
where
    W: WorldView + ?Sized,
{
    let signals: Vec<(Hazard, Coord)> = kb.signals().collect();

    for (hazard, signal_at) in signals {
        let Some(open) = candidates(kb, world, hazard, signal_at) else {
            continue;
        };
        let [only] = open.as_slice() else {
            continue;
        };

        if kb.tell(Fact::holds(hazard.at(*only)))?.is_new() {
            tracing::info!(
                hazard = %hazard,
                cell = %only,
                signal = %signal_at,
                "hazard located"
            );
            out.located.push((hazard, *only));
        }
    }
    Ok(())
}
