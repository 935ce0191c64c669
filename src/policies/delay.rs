//! # Delay policy between attempts.
//!
//! [`DelayPolicy`] controls how long the poller sleeps after an unsuccessful
//! attempt. Two variants exist:
//! - [`DelayPolicy::Linear`] the same delay after every attempt;
//! - [`DelayPolicy::Exponential`] the delay doubles after every attempt until it
//!   reaches the ceiling, then holds there.
//!
//! A policy is a plain value. The stateful part is [`Delays`], a fresh sequence
//! created for every wait, so the delay state advances within one wait and
//! restarts with the next one.
//!
//! The delay for attempt `n` (0-indexed) under the exponential variant is
//! `base × 2^n`, clamped to `max`. Because it is derived from the attempt number
//! alone, rounding never accumulates across attempts.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use waitfor::DelayPolicy;
//!
//! let policy = DelayPolicy::exponential(Duration::from_millis(100), Duration::from_secs(1))?;
//! let delays: Vec<Duration> = policy.delays().take(6).collect();
//! assert_eq!(
//!     delays,
//!     [100, 200, 400, 800, 1000, 1000].map(Duration::from_millis),
//! );
//! # Ok::<(), waitfor::ConfigError>(())
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Growth factor of the exponential variant.
const FACTOR: f64 = 2.0;

/// Policy producing successive waits between attempts.
///
/// Serialized with humantime durations:
/// ```text
/// { "kind": "linear", "delay": "500ms" }
/// { "kind": "exponential", "base": "100ms", "max": "1s" }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DelayPolicy {
    /// Constant delay after every attempt. Zero busy-polls.
    Linear {
        /// Delay between attempts.
        #[serde(with = "humantime_serde")]
        delay: Duration,
    },

    /// Delay doubling after every attempt, capped at `max`.
    ///
    /// Elapsed times reported under this policy are approximate: a condition
    /// may turn true long before the next (increasingly distant) check sees it.
    Exponential {
        /// Delay after the first attempt.
        #[serde(with = "humantime_serde")]
        base: Duration,
        /// Ceiling the delay holds at once reached.
        #[serde(with = "humantime_serde")]
        max: Duration,
    },
}

impl Default for DelayPolicy {
    /// Returns a linear policy with a one second delay.
    fn default() -> Self {
        DelayPolicy::Linear {
            delay: Duration::from_secs(1),
        }
    }
}

impl DelayPolicy {
    /// Constant delay between attempts.
    pub fn linear(delay: Duration) -> Self {
        DelayPolicy::Linear { delay }
    }

    /// Doubling delay starting at `base` and holding at `max`.
    ///
    /// # Errors
    /// - [`ConfigError::ZeroBase`] if `base` is zero;
    /// - [`ConfigError::CeilingBelowBase`] if `max < base`.
    pub fn exponential(base: Duration, max: Duration) -> Result<Self, ConfigError> {
        let policy = DelayPolicy::Exponential { base, max };
        policy.validate()?;
        Ok(policy)
    }

    /// Re-checks the invariants enforced by the constructors.
    ///
    /// Needed for values built through the public variants or deserialized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            DelayPolicy::Linear { .. } => Ok(()),
            DelayPolicy::Exponential { base, .. } if base.is_zero() => Err(ConfigError::ZeroBase),
            DelayPolicy::Exponential { base, max } if max < base => {
                Err(ConfigError::CeilingBelowBase { base, max })
            }
            DelayPolicy::Exponential { .. } => Ok(()),
        }
    }

    /// Largest delay this policy ever produces.
    pub fn max_delay(&self) -> Duration {
        match *self {
            DelayPolicy::Linear { delay } => delay,
            DelayPolicy::Exponential { max, .. } => max,
        }
    }

    /// Computes the delay following attempt number `attempt` (0-indexed).
    ///
    /// # Notes
    /// - Linear ignores `attempt`.
    /// - Exponential overflow (non-finite or beyond `max`) clamps to `max`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match *self {
            DelayPolicy::Linear { delay } => delay,
            DelayPolicy::Exponential { base, max } => {
                let max_secs = max.as_secs_f64();
                let clamped_exp = attempt.min(i32::MAX as u32) as i32;
                let unclamped_secs = base.as_secs_f64() * FACTOR.powi(clamped_exp);

                if !unclamped_secs.is_finite() || unclamped_secs > max_secs {
                    max
                } else {
                    Duration::from_secs_f64(unclamped_secs)
                }
            }
        }
    }

    /// Sum of the first `n` delays of a fresh sequence.
    pub fn total_of_first(&self, n: u32) -> Duration {
        (0..n).map(|i| self.delay_for(i)).sum()
    }

    /// Starts a fresh delay sequence.
    pub fn delays(&self) -> Delays {
        Delays {
            policy: *self,
            attempt: 0,
        }
    }
}

/// Stateful, endless sequence of delays produced by a [`DelayPolicy`].
#[derive(Clone, Debug)]
pub struct Delays {
    policy: DelayPolicy,
    attempt: u32,
}

impl Delays {
    /// Returns the next delay and advances the sequence.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.policy.delay_for(self.attempt);
        self.attempt = self.attempt.saturating_add(1);
        delay
    }
}

impl Iterator for Delays {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        Some(self.next_delay())
    }
}
