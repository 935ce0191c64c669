//! # Poller configuration.
//!
//! Provides [`PollConfig`], every knob of a wait except the action, the
//! condition and the subscribers.
//!
//! Config is used in two ways:
//! 1. **Builder**: each `Poller` setter writes one field.
//! 2. **Stored settings**: `Poller::from_config(action, condition, config)`
//!    applies a deserialized config after validating it.
//!
//! ## Serialized form
//! ```text
//! {
//!   "delay": { "kind": "exponential", "base": "100ms", "max": "2s" },
//!   "timeout": "30s",
//!   "handle_errors": true,
//!   "verbosity": "quiet"
//! }
//! ```
//! Missing fields take their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::events::{Event, EventKind};
use crate::policies::DelayPolicy;

/// How much of a wait's progress reaches subscribers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// Every event.
    #[default]
    Normal,
    /// Every event, but the success report carries no timing.
    Quiet,
    /// Error-class events only (handled/unhandled action errors, timeout).
    VeryQuiet,
}

impl Verbosity {
    /// Whether `event` passes this verbosity level.
    pub fn allows(&self, event: &Event) -> bool {
        match self {
            Verbosity::Normal | Verbosity::Quiet => true,
            Verbosity::VeryQuiet => event.is_error(),
        }
    }

    /// Filters `event` and strips what this level hides.
    pub fn apply(&self, mut event: Event) -> Option<Event> {
        if !self.allows(&event) {
            return None;
        }
        if *self == Verbosity::Quiet && event.kind == EventKind::Succeeded {
            event.elapsed = None;
        }
        Some(event)
    }
}

/// Settings of one poller.
///
/// ## Field semantics
/// - `delay`: delay policy between attempts (default linear 1s)
/// - `timeout`: total budget (`None` = wait forever)
/// - `handle_errors`: treat action errors as unsatisfied attempts instead of aborting
/// - `reraise_original`: on timeout, return the last action error instead of
///   [`WaitError::TimedOut`](crate::WaitError::TimedOut) when the final attempt errored
/// - `message`: description used in diagnostics (default: the action's type name)
/// - `verbosity`: event filter
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay policy between attempts.
    pub delay: DelayPolicy,

    /// Total time budget.
    ///
    /// - `None` = no timeout (wait until the condition holds)
    /// - `Some(Duration::ZERO)` = exactly one attempt
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,

    /// Catch action errors and keep polling.
    pub handle_errors: bool,

    /// Prefer the action's own error over a timeout error.
    pub reraise_original: bool,

    /// Human description of the polled action.
    pub message: Option<String>,

    /// Event filter.
    pub verbosity: Verbosity,
}

impl PollConfig {
    /// Checks invariants that deserialization cannot enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.delay.validate()
    }

    /// Upper bound on how far past the timeout a wait may run, ignoring the
    /// duration of the action itself.
    #[inline]
    pub fn worst_case_overrun(&self) -> Duration {
        self.delay.max_delay()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let cfg = PollConfig::default();
        assert_eq!(cfg.delay, DelayPolicy::linear(Duration::from_secs(1)));
        assert_eq!(cfg.timeout, None);
        assert!(!cfg.handle_errors);
        assert!(!cfg.reraise_original);
        assert_eq!(cfg.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_deserialize_humantime_fields() {
        let cfg: PollConfig = serde_json::from_str(
            r#"{
                "delay": { "kind": "exponential", "base": "100ms", "max": "2s" },
                "timeout": "30s",
                "handle_errors": true,
                "verbosity": "very_quiet"
            }"#,
        )
        .unwrap();

        assert_eq!(
            cfg,
            PollConfig {
                delay: DelayPolicy::exponential(Duration::from_millis(100), Duration::from_secs(2))
                    .unwrap(),
                timeout: Some(Duration::from_secs(30)),
                handle_errors: true,
                reraise_original: false,
                message: None,
                verbosity: Verbosity::VeryQuiet,
            }
        );
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.worst_case_overrun(), Duration::from_secs(2));
    }

    #[test]
    fn test_empty_object_is_default() {
        let cfg: PollConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, PollConfig::default());
    }

    #[test]
    fn test_validate_catches_bad_exponential() {
        let cfg: PollConfig = serde_json::from_str(
            r#"{ "delay": { "kind": "exponential", "base": "2s", "max": "1s" } }"#,
        )
        .unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::CeilingBelowBase { .. })
        ));
    }

    #[test]
    fn test_verbosity_filters() {
        let ok = Event::new(EventKind::Succeeded);
        let miss = Event::new(EventKind::AttemptFailed);
        let err = Event::new(EventKind::ActionErrored);

        assert!(Verbosity::Normal.allows(&ok));
        assert!(Verbosity::Quiet.allows(&ok));
        assert!(Verbosity::Quiet.allows(&miss));
        assert!(!Verbosity::VeryQuiet.allows(&miss));
        assert!(Verbosity::VeryQuiet.allows(&err));
    }

    #[test]
    fn test_quiet_strips_success_timing_only() {
        let ok = Event::new(EventKind::Succeeded)
            .with_attempt(3)
            .with_elapsed(Duration::from_millis(40));
        let kept = Verbosity::Quiet.apply(ok.clone()).unwrap();
        assert_eq!(kept.attempt, Some(3));
        assert_eq!(kept.elapsed, None);

        assert_eq!(Verbosity::Normal.apply(ok).unwrap().elapsed, Some(Duration::from_millis(40)));

        let miss = Event::new(EventKind::AttemptFailed).with_elapsed(Duration::from_millis(5));
        assert_eq!(
            Verbosity::Quiet.apply(miss).unwrap().elapsed,
            Some(Duration::from_millis(5))
        );
        assert!(Verbosity::VeryQuiet.apply(Event::new(EventKind::Succeeded)).is_none());
    }
}
