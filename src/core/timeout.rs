//! # Timeout budget.
//!
//! [`Timeout`] is the total wall-clock budget of one wait. It resolves to an
//! `Option<Duration>`: `None` waits forever (the caller is responsible for not
//! polling something that never turns ready).
//!
//! Accepted forms:
//! - a [`Duration`] (or `Option<Duration>`);
//! - seconds as a float ([`Timeout::from_secs_f64`]);
//! - a string: plain seconds (`"2"`, `"1.5"`) or humantime (`"1h 10m 5s"`, `"500ms"`).
//!
//! ```rust
//! use std::time::Duration;
//! use waitfor::Timeout;
//!
//! let t: Timeout = "1m 30s".parse()?;
//! assert_eq!(t.as_duration(), Some(Duration::from_secs(90)));
//! assert_eq!("1.5".parse::<Timeout>()?.as_duration(), Some(Duration::from_millis(1500)));
//! assert!("soon".parse::<Timeout>().is_err());
//! # Ok::<(), waitfor::ConfigError>(())
//! ```

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Total time budget of a wait.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timeout(Option<Duration>);

impl Timeout {
    /// Wait forever.
    pub const NEVER: Timeout = Timeout(None);

    /// Budget of `d`.
    pub const fn after(d: Duration) -> Self {
        Timeout(Some(d))
    }

    /// Budget in (fractional) seconds.
    ///
    /// # Errors
    /// [`ConfigError::OutOfRangeTimeout`] for negative, NaN, infinite or
    /// overflowing values.
    pub fn from_secs_f64(secs: f64) -> Result<Self, ConfigError> {
        if secs.is_sign_negative() {
            return Err(ConfigError::OutOfRangeTimeout { secs });
        }
        Duration::try_from_secs_f64(secs)
            .map(Timeout::after)
            .map_err(|_| ConfigError::OutOfRangeTimeout { secs })
    }

    /// The resolved budget (`None` = unbounded).
    #[inline]
    pub fn as_duration(&self) -> Option<Duration> {
        self.0
    }

    /// True once `elapsed` has used up the budget.
    #[inline]
    pub fn is_exceeded(&self, elapsed: Duration) -> bool {
        matches!(self.0, Some(budget) if elapsed >= budget)
    }
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        Timeout(Some(d))
    }
}

impl From<Option<Duration>> for Timeout {
    fn from(d: Option<Duration>) -> Self {
        Timeout(d)
    }
}

impl From<Timeout> for Option<Duration> {
    fn from(t: Timeout) -> Self {
        t.0
    }
}

impl TryFrom<f64> for Timeout {
    type Error = ConfigError;

    fn try_from(secs: f64) -> Result<Self, Self::Error> {
        Timeout::from_secs_f64(secs)
    }
}

impl TryFrom<&str> for Timeout {
    type Error = ConfigError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Timeout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(secs) = trimmed.parse::<f64>() {
            return Timeout::from_secs_f64(secs);
        }
        humantime::parse_duration(trimmed)
            .map(Timeout::after)
            .map_err(|_| ConfigError::InvalidTimeout {
                input: s.to_string(),
            })
    }
}
