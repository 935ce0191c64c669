//! # LogWriter: tracing-backed event renderer
//!
//! A subscriber that forwards [`Event`]s to `tracing`, at the level a human
//! operator would expect for each kind:
//!
//! ```text
//! DEBUG started          poll="function probe"
//! DEBUG attempt failed   poll="function probe" attempt=1 last=false
//! INFO  action errored   poll="function probe" attempt=2 err="connection refused"
//! DEBUG backoff          poll="function probe" attempt=2 delay=200ms
//! DEBUG succeeded        poll="function probe" attempt=3 elapsed=312ms
//! ERROR timed out        poll="function probe" attempt=9 elapsed=2.01s last=false
//! ```
//!
//! Under [`Verbosity::Quiet`](crate::Verbosity::Quiet) the success line has
//! no `elapsed` field. Output goes wherever the application's `tracing`
//! subscriber sends it.

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        let poll = e.message.as_deref().unwrap_or("action");
        let attempt = e.attempt.unwrap_or_default();
        match e.kind {
            EventKind::Started => {
                tracing::debug!(poll, "started");
            }
            EventKind::AttemptFailed => {
                tracing::debug!(poll, attempt, last = e.reason.as_deref(), "attempt failed");
            }
            EventKind::ActionErrored => {
                tracing::info!(
                    poll,
                    attempt,
                    err = e.reason.as_deref(),
                    "action errored; continuing because errors are handled"
                );
            }
            EventKind::ActionAborted => {
                tracing::info!(
                    poll,
                    attempt,
                    elapsed = ?e.elapsed,
                    err = e.reason.as_deref(),
                    "action errored; aborting wait"
                );
            }
            EventKind::BackoffScheduled => {
                tracing::debug!(poll, attempt, delay = ?e.delay, "backoff");
            }
            EventKind::Succeeded => match e.elapsed {
                Some(elapsed) => tracing::debug!(poll, attempt, ?elapsed, "succeeded"),
                None => tracing::debug!(poll, attempt, "succeeded"),
            },
            EventKind::TimedOut => {
                tracing::error!(
                    poll,
                    attempt,
                    elapsed = ?e.elapsed,
                    last = e.reason.as_deref(),
                    "timed out"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
