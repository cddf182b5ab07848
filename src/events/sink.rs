//! Event sinks.
//!
//! Resolution code emits into any `EventSink`. A match keeps an `EventLog`
//! that the presentation layer drains after each call.

use serde::{Deserialize, Serialize};

use super::event::MatchEvent;

/// Receiver for match events.
pub trait EventSink {
    fn emit(&mut self, event: MatchEvent);
}

impl EventSink for Vec<MatchEvent> {
    fn emit(&mut self, event: MatchEvent) {
        self.push(event);
    }
}

/// Ordered buffer of events not yet consumed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: MatchEvent) {
        self.events.push(event);
    }
}
