//! # Diagnostic events emitted by the polling loop.
//!
//! The [`EventKind`] enum classifies what happened during a wait:
//! - **Progress events**: the wait started, an attempt missed, a delay was scheduled
//! - **Error events**: the action errored (handled or not), the wait timed out
//! - **Terminal events**: success, timeout, aborted
//!
//! The [`Event`] struct carries the metadata: timestamps, the poll description,
//! attempt number, elapsed time, delay and a rendered reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use waitfor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ActionErrored)
//!     .with_message("function probe")
//!     .with_reason("connection refused")
//!     .with_attempt(3)
//!     .with_elapsed(Duration::from_millis(40));
//!
//! assert_eq!(ev.kind, EventKind::ActionErrored);
//! assert_eq!(ev.message.as_deref(), Some("function probe"));
//! assert!(ev.is_error());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of polling events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A wait started.
    ///
    /// Sets:
    /// - `message`: poll description
    Started,

    /// An attempt returned a value that did not satisfy the condition.
    ///
    /// Sets:
    /// - `message`, `attempt`, `elapsed`
    /// - `reason`: the returned value (`Debug`)
    AttemptFailed,

    /// The action errored and error handling is enabled; the wait continues.
    ///
    /// Sets:
    /// - `message`, `attempt`, `elapsed`
    /// - `reason`: the error (`Display`)
    ActionErrored,

    /// The action errored and error handling is disabled; the wait ends.
    ///
    /// Sets:
    /// - `message`, `attempt`, `elapsed`
    /// - `reason`: the error (`Display`)
    ActionAborted,

    /// Next attempt scheduled after a delay.
    ///
    /// Sets:
    /// - `message`, `attempt` (previous attempt), `elapsed`, `delay`
    BackoffScheduled,

    /// The condition was satisfied.
    ///
    /// Sets:
    /// - `message`, `attempt`, `elapsed`
    Succeeded,

    /// The timeout budget ran out.
    ///
    /// Sets:
    /// - `message`, `attempt`, `elapsed`
    /// - `reason`: the last result (`Debug`) or the last error
    TimedOut,
}

impl EventKind {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::Started => "started",
            EventKind::AttemptFailed => "attempt_failed",
            EventKind::ActionErrored => "action_errored",
            EventKind::ActionAborted => "action_aborted",
            EventKind::BackoffScheduled => "backoff_scheduled",
            EventKind::Succeeded => "succeeded",
            EventKind::TimedOut => "timed_out",
        }
    }
}

/// Polling event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Description of the polled action.
    pub message: Option<Arc<str>>,
    /// Attempt count (starting from 1).
    pub attempt: Option<u32>,
    /// Time since the wait started.
    pub elapsed: Option<Duration>,
    /// Delay before the next attempt.
    pub delay: Option<Duration>,
    /// Human-readable reason (error text, last value).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            message: None,
            attempt: None,
            elapsed: None,
            delay: None,
            reason: None,
        }
    }

    /// Attaches the poll description.
    #[inline]
    pub fn with_message(mut self, message: impl Into<Arc<str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches an attempt count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches the elapsed time.
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        self.elapsed = Some(d);
        self
    }

    /// Attaches a delay.
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        self.delay = Some(d);
        self
    }

    /// Error-class events survive every verbosity level.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(
            self.kind,
            EventKind::ActionErrored | EventKind::ActionAborted | EventKind::TimedOut
        )
    }

    /// Success, timeout, and abort end a wait.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::Succeeded | EventKind::TimedOut | EventKind::ActionAborted
        )
    }
}
