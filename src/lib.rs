//! # waitfor
//!
//! **waitfor** polls a closure until its value satisfies a condition or a
//! timeout runs out, and reports the value together with the time it took.
//!
//! It is a local, synchronous helper: the calling thread blocks for the whole
//! wait. Typical uses are tests and tooling that must wait for an external
//! effect (a file appearing, a service answering, a state flipping) with no
//! way to be notified directly.
//!
//! ## Architecture
//! ```text
//!    action: FnMut() -> Result<T, E>     condition: Condition<T>
//!                 │                              │
//!                 ▼                              ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Poller                                                           │
//! │  - PollConfig (delay policy, timeout, error handling, verbosity)  │
//! │  - Delays (fresh per wait: linear or exponential with ceiling)    │
//! │  - SubscriberSet (injected observers)                             │
//! └──────┬──────────────────────────────┬─────────────────────────────┘
//!        ▼                              ▼
//!  Ok(WaitResult { value,        Err(WaitError::TimedOut { last, .. })
//!      elapsed, attempts })      Err(WaitError::Action(e))
//! ```
//!
//! ### Lifecycle
//! ```text
//! loop {
//!   ├─► attempt += 1
//!   ├─► action()
//!   │       ├─ Ok(v) and condition(v) ─► Succeeded, return Ok
//!   │       ├─ Ok(v)                   ─► AttemptFailed, remember v
//!   │       ├─ Err(e), handle_errors   ─► ActionErrored, remember e
//!   │       └─ Err(e)                  ─► ActionAborted, return Err(Action(e))
//!   ├─► elapsed >= timeout ─► TimedOut, return Err(TimedOut)
//!   ├─► publish BackoffScheduled{ delay }
//!   ├─► sleep(delay)
//!   └─► on_failure hook
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                        |
//! |-------------------|--------------------------------------------------------------|-------------------------------------------|
//! | **Polling**       | Drive an action until a condition holds.                     | [`Poller`], [`wait_for`], [`wait_until`]  |
//! | **Policies**      | Success conditions and delay growth.                         | [`Condition`], [`DelayPolicy`]            |
//! | **Subscriber API**| Observe attempts, errors, delays, outcome.                   | [`Subscribe`], [`Recorder`]               |
//! | **Errors**        | Typed timeout / action / configuration errors.               | [`WaitError`], [`ConfigError`]            |
//! | **Configuration** | Serializable settings with humantime durations.              | [`PollConfig`], [`Timeout`]               |
//!
//! ## Optional features
//! - `logging` _(default)_: exports [`LogWriter`], a subscriber writing through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use waitfor::{Condition, DelayPolicy, Poller, Recorder, WaitError};
//!
//! #[derive(Debug)]
//! struct NotUp;
//! impl std::fmt::Display for NotUp {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str("service not up")
//!     }
//! }
//!
//! let rec = Arc::new(Recorder::new());
//! let mut probes = 0;
//! let res = Poller::with_condition(
//!     || {
//!         probes += 1;
//!         if probes < 3 { Err(NotUp) } else { Ok("healthy") }
//!     },
//!     Condition::equals("healthy"),
//! )
//! .delay(DelayPolicy::exponential(Duration::from_millis(1), Duration::from_millis(4))?)
//! .timeout(Duration::from_secs(2))
//! .handle_errors(true)
//! .message("health probe")
//! .subscribe(rec.clone())
//! .wait();
//!
//! let res = match res {
//!     Ok(res) => res,
//!     Err(WaitError::TimedOut { .. }) => panic!("service never came up"),
//!     Err(other) => panic!("{other}"),
//! };
//! assert_eq!(res.value, "healthy");
//! assert_eq!(res.attempts, 3);
//! # Ok::<(), waitfor::ConfigError>(())
//! ```
mod core;
mod error;
mod events;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{
    PollConfig, Poller, RefreshTimer, Timeout, Verbosity, WaitResult, infallible, wait_for,
    wait_until,
};
pub use error::{ConfigError, WaitError};
pub use events::{Event, EventKind};
pub use policies::{Condition, DelayPolicy, Delays, PredicateFn, Truthy};
pub use subscribers::{Recorder, Subscribe, SubscriberSet};

// Optional: built-in subscriber forwarding events to `tracing`.
// Enabled by default; disable with `default-features = false`.
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
