//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging custom event handlers into a
//! poller. Subscribers are injected per poller
//! ([`Poller::subscribe`](crate::Poller::subscribe)); there is no global logger.
//!
//! ## Contract
//! - `on_event` runs **inline** on the polling thread, between attempts. Slow
//!   subscribers stretch the wait; keep handlers cheap.
//! - A panicking subscriber is isolated by the
//!   [`SubscriberSet`](crate::SubscriberSet) and does not abort the wait.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use waitfor::{Event, EventKind, Subscribe};
//!
//! #[derive(Default)]
//! struct ErrorCounter(AtomicUsize);
//!
//! impl Subscribe for ErrorCounter {
//!     fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::ActionErrored {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!     fn name(&self) -> &'static str { "error-counter" }
//! }
//! ```

use crate::events::Event;

/// Contract for event subscribers.
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    ///
    /// # Parameters
    /// - `event`: Reference to the event (does not transfer ownership)
    fn on_event(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
