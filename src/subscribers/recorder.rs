//! # Recorder: in-memory event capture
//!
//! Keeps every event it receives so callers (tests in particular) can assert
//! on the diagnostics of a wait without touching global logging state.

use parking_lot::Mutex;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Subscriber storing received events in order.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    /// Construct an empty [`Recorder`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events received so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Kinds of all events received so far, in order.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().iter().map(|e| e.kind).collect()
    }

    /// Number of received events of the given kind.
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.lock().iter().filter(|e| e.kind == kind).count()
    }

    /// Most recent event of the given kind.
    pub fn last_of(&self, kind: EventKind) -> Option<Event> {
        self.events.lock().iter().rev().find(|e| e.kind == kind).cloned()
    }

    /// Drops everything recorded so far.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Subscribe for Recorder {
    fn on_event(&self, event: &Event) {
        self.events.lock().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "Recorder"
    }
}
