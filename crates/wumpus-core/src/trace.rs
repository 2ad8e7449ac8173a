#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::Coord;

/// One inference or decision milestone, stamped with the step it happened on.
///
/// `value` is tag-specific: facts dropped by a retraction, or `1` for a hit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub step: u64,
    pub tag: Cow<'static, str>,
    pub at: Option<Coord>,
    pub value: u64,
}

impl TraceEvent {
    pub fn new(step: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            step,
            tag: tag.into(),
            at: None,
            value: 0,
        }
    }

    pub fn with_at(mut self, at: Coord) -> Self {
        self.at = Some(at);
        self
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }
}

pub mod tags {
    pub const SAFE: &str = "deduce.safe";
    pub const PIT_LOCATED: &str = "deduce.pit";
    pub const WUMPUS_LOCATED: &str = "deduce.wumpus";
    pub const GOLD: &str = "percept.gold";
    pub const ADVANCE: &str = "act.advance";
    pub const RETREAT: &str = "act.retreat";
    pub const ATTACK: &str = "act.attack";
    pub const RETRACT: &str = "kb.retract";
    pub const HALT: &str = "act.halt";
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }
}

/// Collects events into an optional in-memory [`TraceLog`] and/or streams them
/// into a user-provided sink. With neither attached, emitting is free.
#[derive(Default)]
pub struct Tracer {
    log: Option<TraceLog>,
    sink: Option<Box<dyn TraceSink>>,
}

impl Tracer {
    pub fn record(&mut self) {
        self.log.get_or_insert_with(TraceLog::default);
    }

    pub fn set_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.sink = Some(sink);
    }

    pub fn log(&self) -> Option<&TraceLog> {
        self.log.as_ref()
    }

    pub fn take_log(&mut self) -> Option<TraceLog> {
        self.log.take()
    }

    pub fn emit(&mut self, event: TraceEvent) {
        if let Some(log) = self.log.as_mut() {
            log.push(event.clone());
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(event);
        }
    }
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer")
            .field("log_events", &self.log.as_ref().map(|l| l.events.len()))
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
