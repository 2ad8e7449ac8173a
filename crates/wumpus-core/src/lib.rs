//! Deterministic, percept-driven inference kernel for a hazard-grid agent.
//!
//! The agent keeps a typed [`KnowledgeBase`], turns each step's [`Percepts`]
//! into facts, deduces safe cells and hazard locations, and drives a small
//! goal state machine (seek gold, return home, terminate). The world itself is
//! an external collaborator behind [`WorldView`] / [`WorldMut`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod cells;
pub mod coord;
pub mod deduce;
pub mod error;
pub mod goal;
pub mod kb;
pub mod path;
pub mod percept;
pub mod quiver;
pub mod run;
pub mod trace;
pub mod world;

pub use agent::{Action, Agent, AgentConfig, Effect, StepReport};
pub use cells::CellSet;
pub use coord::Coord;
pub use deduce::Deductions;
pub use error::{AgentError, KbError};
pub use goal::{Goal, Termination, Trigger};
pub use kb::{Fact, Hazard, KnowledgeBase, Polarity, Proposition, Told};
pub use path::PathHistory;
pub use percept::{PerceptUpdate, Percepts};
pub use quiver::{Arrow, Quiver};
pub use run::{Outcome, RunReport};
pub use trace::{TraceEvent, TraceLog, TraceSink, Tracer};
pub use world::{WorldMut, WorldView};
