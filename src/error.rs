//! Error types used by the poller.
//!
//! This module defines two error enums:
//!
//! - [`WaitError`]: terminal failures of a single [`Poller::wait`](crate::Poller::wait) call.
//! - [`ConfigError`]: invalid delay or timeout configuration, rejected at construction.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// # Terminal failures of a wait.
///
/// A wait ends in exactly one of three ways: the condition is met (`Ok`), the
/// timeout budget runs out ([`WaitError::TimedOut`]), or the action fails while
/// error handling is disabled ([`WaitError::Action`]).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum WaitError<T, E> {
    /// The condition was never satisfied within the timeout budget.
    #[error("could not do {message} in time: {attempts} attempts over {elapsed:?}")]
    TimedOut {
        /// Description of the polled action.
        message: String,
        /// Last value returned by the action (`None` if every attempt errored).
        last: Option<T>,
        /// Rendered error of the final attempt, if it errored.
        last_error: Option<String>,
        /// Time spent from the first attempt until the budget check failed.
        elapsed: Duration,
        /// Number of attempts made.
        attempts: u32,
    },

    /// The action itself failed.
    #[error("action failed: {0}")]
    Action(E),
}

impl<T, E> WaitError<T, E> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use waitfor::WaitError;
    ///
    /// let err: WaitError<u32, String> = WaitError::Action("boom".into());
    /// assert_eq!(err.as_label(), "wait_action_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            WaitError::TimedOut { .. } => "wait_timed_out",
            WaitError::Action(_) => "wait_action_failed",
        }
    }

    /// Returns `true` for [`WaitError::TimedOut`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::TimedOut { .. })
    }

    /// Last unsuccessful value observed before timing out.
    pub fn last(&self) -> Option<&T> {
        match self {
            WaitError::TimedOut { last, .. } => last.as_ref(),
            WaitError::Action(_) => None,
        }
    }

    /// Consumes the error and returns the last observed value.
    ///
    /// Lets callers treat a timeout as non-fatal and keep whatever the action
    /// returned last.
    pub fn into_last(self) -> Option<T> {
        match self {
            WaitError::TimedOut { last, .. } => last,
            WaitError::Action(_) => None,
        }
    }

    /// Elapsed time recorded on timeout.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            WaitError::TimedOut { elapsed, .. } => Some(*elapsed),
            WaitError::Action(_) => None,
        }
    }

    /// Number of attempts made before timing out.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            WaitError::TimedOut { attempts, .. } => Some(*attempts),
            WaitError::Action(_) => None,
        }
    }
}

impl<T: fmt::Debug, E: fmt::Display> WaitError<T, E> {
    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            WaitError::TimedOut {
                message,
                last,
                attempts,
                elapsed,
                ..
            } => {
                format!("{message} timed out after {elapsed:?} ({attempts} tries); last={last:?}")
            }
            WaitError::Action(error) => format!("action error: {error}"),
        }
    }
}

/// # Invalid poller configuration.
///
/// Returned by the fallible constructors of
/// [`DelayPolicy`](crate::DelayPolicy) and [`Timeout`](crate::Timeout) so that
/// misuse surfaces before the first attempt.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Exponential ceiling is smaller than its base delay.
    #[error("exponential ceiling {max:?} is below base delay {base:?}")]
    CeilingBelowBase {
        /// Configured base delay.
        base: Duration,
        /// Configured ceiling.
        max: Duration,
    },

    /// Exponential base delay of zero never grows.
    #[error("exponential base delay must be non-zero")]
    ZeroBase,

    /// Timeout string could not be parsed.
    #[error("could not parse timeout {input:?}")]
    InvalidTimeout {
        /// The rejected input.
        input: String,
    },

    /// Timeout in seconds was negative, NaN, or too large for a `Duration`.
    #[error("timeout must be a finite non-negative number of seconds, got {secs}")]
    OutOfRangeTimeout {
        /// The rejected value.
        secs: f64,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use waitfor::ConfigError;
    ///
    /// assert_eq!(ConfigError::ZeroBase.as_label(), "config_zero_base");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::CeilingBelowBase { .. } => "config_ceiling_below_base",
            ConfigError::ZeroBase => "config_zero_base",
            ConfigError::InvalidTimeout { .. } => "config_invalid_timeout",
            ConfigError::OutOfRangeTimeout { .. } => "config_out_of_range_timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed_out() -> WaitError<u32, String> {
        WaitError::TimedOut {
            message: "function probe".into(),
            last: Some(7),
            last_error: None,
            elapsed: Duration::from_millis(1500),
            attempts: 3,
        }
    }

    #[test]
    fn test_timeout_accessors() {
        let err = timed_out();
        assert!(err.is_timeout());
        assert_eq!(err.last(), Some(&7));
        assert_eq!(err.elapsed(), Some(Duration::from_millis(1500)));
        assert_eq!(err.attempts(), Some(3));
        assert_eq!(err.as_label(), "wait_timed_out");
        assert_eq!(err.into_last(), Some(7));
    }

    #[test]
    fn test_timeout_display_names_the_action() {
        let text = timed_out().to_string();
        assert!(text.contains("function probe"), "{text}");
        assert!(text.contains("3 attempts"), "{text}");
    }

    #[test]
    fn test_action_error_has_no_timeout_data() {
        let err: WaitError<u32, String> = WaitError::Action("refused".into());
        assert!(!err.is_timeout());
        assert_eq!(err.last(), None);
        assert_eq!(err.elapsed(), None);
        assert_eq!(err.as_message(), "action error: refused");
        assert_eq!(err.to_string(), "action failed: refused");
    }

    #[test]
    fn test_config_error_labels() {
        let err = ConfigError::CeilingBelowBase {
            base: Duration::from_secs(2),
            max: Duration::from_secs(1),
        };
        assert_eq!(err.as_label(), "config_ceiling_below_base");
        assert!(err.to_string().contains("below base"));
    }
}
