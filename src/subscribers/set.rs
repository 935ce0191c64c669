//! # SubscriberSet: synchronous fan-out over multiple subscribers
//!
//! [`SubscriberSet`] hands each [`Event`](crate::Event) to every subscriber in
//! registration order.
//!
//! ## What it guarantees
//! - Per-subscriber order equals emission order.
//! - Panics inside subscribers are caught and logged (isolation).
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        ├────────────────► S1.on_event()   (catch_unwind)
//!        ├────────────────► S2.on_event()   (catch_unwind)
//!        └────────────────► SN.on_event()   (catch_unwind)
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::events::Event;

use super::Subscribe;

/// Composite fan-out over the subscribers attached to one poller.
#[derive(Clone, Default)]
pub struct SubscriberSet {
    subs: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    /// Creates a set from existing subscribers.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs }
    }

    /// Appends one subscriber.
    pub fn push(&mut self, sub: Arc<dyn Subscribe>) {
        self.subs.push(sub);
    }

    /// Fan-out one event to all subscribers.
    ///
    /// A panicking subscriber is reported through `tracing` and skipped; the
    /// remaining subscribers still receive the event.
    pub fn emit(&self, event: &Event) {
        for sub in &self.subs {
            let delivered = catch_unwind(AssertUnwindSafe(|| sub.on_event(event)));
            if let Err(panic_err) = delivered {
                tracing::warn!(
                    subscriber = sub.name(),
                    event = event.kind.as_label(),
                    panic = panic_message(panic_err.as_ref()),
                    "subscriber panicked"
                );
            }
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subs.len()
    }
}

impl std::fmt::Debug for SubscriberSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.subs.iter().map(|s| s.name()))
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown"
    }
}
