use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::deduce::{self, Deductions};
use crate::percept::{self, PerceptUpdate};
use crate::trace::{tags, TraceEvent, TraceLog, TraceSink, Tracer};
use crate::{
    AgentError, CellSet, Coord, Fact, Goal, Hazard, KnowledgeBase, PathHistory, Percepts,
    Polarity, Proposition, Quiver, Termination, Trigger, WorldMut, WorldView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentConfig {
    pub start: Coord,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            start: Coord::new(1, 1),
        }
    }
}

/// One decision. Attacking and moving are mutually exclusive within a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    /// Move forward onto a safe, unvisited neighbour.
    Advance(Coord),
    /// Step back along the path history.
    Retreat(Coord),
    Attack(Coord),
    Halt(Termination),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Advance(c) => write!(f, "advance to {c}"),
            Action::Retreat(c) => write!(f, "retreat to {c}"),
            Action::Attack(c) => write!(f, "attack {c}"),
            Action::Halt(Termination::Success) => f.write_str("halt (home with gold)"),
            Action::Halt(Termination::Stuck) => f.write_str("halt (no safe action)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Effect {
    Moved { from: Coord, to: Coord },
    Shot { target: Coord, hit: bool },
    Halted(Termination),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: u64,
    /// Where the agent stood when it sensed and decided.
    pub at: Coord,
    pub percepts: Percepts,
    pub deductions: Deductions,
    pub action: Action,
    pub effect: Effect,
}

pub struct Agent {
    config: AgentConfig,
    kb: KnowledgeBase,
    position: Coord,
    goal: Goal,
    quiver: Quiver,
    has_gold: bool,
    safe: CellSet,
    visited: CellSet,
    path: PathHistory,
    steps: u64,
    tracer: Tracer,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        let start = config.start;

        let mut kb = KnowledgeBase::new();
        for fact in [
            Fact::holds(Proposition::Safe(start)),
            Fact::not(Proposition::Pit(start)),
            Fact::not(Proposition::Wumpus(start)),
        ] {
            // Fresh store, distinct propositions: cannot conflict.
            let told = kb.tell(fact);
            debug_assert!(told.is_ok());
        }

        Self {
            config,
            kb,
            position: start,
            goal: Goal::SeekGold,
            quiver: Quiver::loaded(),
            has_gold: false,
            safe: CellSet::from_iter([start]),
            visited: CellSet::from_iter([start]),
            path: PathHistory::new(start),
            steps: 0,
            tracer: Tracer::default(),
        }
    }

    /// Keep every trace event in memory, retrievable via [`Agent::trace_log`].
    pub fn with_trace_log(mut self) -> Self {
        self.tracer.record();
        self
    }

    pub fn with_trace_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.tracer.set_sink(sink);
        self
    }

    pub fn config(&self) -> AgentConfig {
        self.config
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn has_gold(&self) -> bool {
        self.has_gold
    }

    pub fn arrows(&self) -> u32 {
        self.quiver.count()
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn safe_cells(&self) -> &CellSet {
        &self.safe
    }

    pub fn visited_cells(&self) -> &CellSet {
        &self.visited
    }

    pub fn path(&self) -> &PathHistory {
        &self.path
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    pub fn trace_log(&self) -> Option<&TraceLog> {
        self.tracer.log()
    }

    pub fn take_trace_log(&mut self) -> Option<TraceLog> {
        self.tracer.take_log()
    }

    fn trace(&mut self, tag: &'static str, at: Option<Coord>, value: u64) {
        let mut event = TraceEvent::new(self.steps, tag).with_value(value);
        if let Some(at) = at {
            event = event.with_at(at);
        }
        self.tracer.emit(event);
    }

    /// Sense the current cell and record what the percepts prove.
    pub fn perceive<W>(&mut self, world: &W) -> Result<(Percepts, PerceptUpdate), AgentError>
    where
        W: WorldView + ?Sized,
    {
        let here = self.position;
        let percepts = world.percepts(here);
        tracing::debug!(step = self.steps, cell = %here, ?percepts, "percepts");

        let neighbors = world.neighbors(here);
        let update = percept::interpret(&mut self.kb, here, &neighbors, percepts)?;

        if update.gold_found && !self.has_gold {
            self.has_gold = true;
            self.goal = self.goal.on(Trigger::GoldAcquired);
            tracing::info!(cell = %here, "gold acquired, heading home");
            self.trace(tags::GOLD, Some(here), 0);
        }

        Ok((percepts, update))
    }

    pub fn deduce<W>(&mut self, world: &W) -> Result<Deductions, AgentError>
    where
        W: WorldView + ?Sized,
    {
        let found = deduce::deduce(&mut self.kb, world, &mut self.safe)?;

        for &cell in &found.newly_safe {
            self.trace(tags::SAFE, Some(cell), 0);
        }
        for &(hazard, cell) in &found.located {
            let tag = match hazard {
                Hazard::Pit => tags::PIT_LOCATED,
                Hazard::Wumpus => tags::WUMPUS_LOCATED,
            };
            self.trace(tag, Some(cell), 0);
        }

        Ok(found)
    }

    /// Pick the next action from current knowledge. Pure.
    pub fn decide<W>(&self, world: &W) -> Action
    where
        W: WorldView + ?Sized,
    {
        match self.goal {
            Goal::Terminated(t) => Action::Halt(t),
            Goal::ReturnHome => {
                if self.position == self.config.start {
                    return Action::Halt(Termination::Success);
                }
                match self.path.previous() {
                    Some(prev) => Action::Retreat(prev),
                    None => Action::Halt(Termination::Stuck),
                }
            }
            Goal::SeekGold => {
                if self.quiver.has_arrow() {
                    if let Some(target) = self.kb.located(Hazard::Wumpus) {
                        return Action::Attack(target);
                    }
                }

                let next = world
                    .neighbors(self.position)
                    .into_iter()
                    .find(|&n| self.safe.contains(n) && !self.visited.contains(n));
                if let Some(next) = next {
                    return Action::Advance(next);
                }

                match self.path.previous() {
                    Some(prev) => Action::Retreat(prev),
                    None => Action::Halt(Termination::Stuck),
                }
            }
        }
    }

    pub fn apply<W>(&mut self, world: &mut W, action: Action) -> Result<Effect, AgentError>
    where
        W: WorldMut + ?Sized,
    {
        let from = self.position;
        match action {
            Action::Advance(to) => {
                self.check_move(&*world, to)?;
                self.path.advance(to);
                self.enter(to);
                tracing::info!(step = self.steps, from = %from, to = %to, "advance");
                self.trace(tags::ADVANCE, Some(to), 0);
                Ok(Effect::Moved { from, to })
            }
            Action::Retreat(to) => {
                self.check_move(&*world, to)?;
                if self.path.previous() != Some(to) {
                    return Err(AgentError::IllegalMove { from, to });
                }
                self.path.retreat();
                self.enter(to);
                tracing::info!(step = self.steps, from = %from, to = %to, "retreat");
                self.trace(tags::RETREAT, Some(to), 0);
                Ok(Effect::Moved { from, to })
            }
            Action::Attack(target) => {
                let arrow = self.quiver.take().ok_or(AgentError::ChargeSpent)?;
                let hit = world.attack(arrow, target);
                tracing::info!(step = self.steps, target = %target, hit, "attack");
                self.trace(tags::ATTACK, Some(target), u64::from(hit));
                if hit {
                    self.on_kill(target)?;
                }
                Ok(Effect::Shot { target, hit })
            }
            Action::Halt(requested) => {
                self.goal = self.goal.on(requested.trigger());
                let Some(reached) = self.goal.termination() else {
                    return Err(AgentError::IllegalHalt {
                        requested,
                        goal: self.goal,
                    });
                };
                tracing::info!(step = self.steps, cell = %self.position, outcome = ?reached, "halt");
                self.trace(tags::HALT, Some(self.position), 0);
                Ok(Effect::Halted(reached))
            }
        }
    }

    /// Perceive, deduce, decide, act.
    pub fn step<W>(&mut self, world: &mut W) -> Result<StepReport, AgentError>
    where
        W: WorldMut + ?Sized,
    {
        self.steps += 1;
        let at = self.position;

        let (percepts, deductions) = if self.goal.is_terminal() {
            (Percepts::default(), Deductions::default())
        } else {
            let (percepts, _) = self.perceive(&*world)?;
            (percepts, self.deduce(&*world)?)
        };

        let action = self.decide(&*world);
        let effect = self.apply(world, action)?;

        Ok(StepReport {
            step: self.steps,
            at,
            percepts,
            deductions,
            action,
            effect,
        })
    }

    fn check_move<W>(&self, world: &W, to: Coord) -> Result<(), AgentError>
    where
        W: WorldView + ?Sized,
    {
        if world.neighbors(self.position).contains(&to) {
            Ok(())
        } else {
            Err(AgentError::IllegalMove {
                from: self.position,
                to,
            })
        }
    }

    fn enter(&mut self, to: Coord) {
        self.position = to;
        self.visited.insert(to);
    }

    /// The wumpus is gone: every stench sensed so far is stale, and so is any
    /// belief about where it stood.
    fn on_kill(&mut self, target: Coord) -> Result<(), AgentError> {
        let dropped = self.kb.retract_where(|fact| match fact.prop {
            Proposition::Stench(_) => true,
            Proposition::Wumpus(_) => fact.polarity == Polarity::Positive,
            _ => false,
        });
        self.kb.tell(Fact::not(Proposition::Wumpus(target)))?;
        self.kb.tell(Fact::not(Proposition::WumpusAlive))?;

        tracing::info!(target = %target, dropped, "wumpus killed, stale signals retracted");
        self.trace(tags::RETRACT, Some(target), dropped as u64);
        Ok(())
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("position", &self.position)
            .field("goal", &self.goal)
            .field("has_gold", &self.has_gold)
            .field("arrows", &self.quiver.count())
            .field("facts", &self.kb.len())
            .field("safe", &self.safe.len())
            .field("visited", &self.visited.len())
            .field("steps", &self.steps)
            .finish()
    }
}
