//! # RefreshTimer: a reusable "has the period passed yet?" deadline.
//!
//! Complements the poller for loops that do their own waiting but need to
//! refresh something (a page, a token, a cached listing) every so often.
//! Purely `Instant`-based: no background thread, no callback.
//!
//! ```rust
//! use std::time::Duration;
//! use waitfor::RefreshTimer;
//!
//! let mut timer = RefreshTimer::new(Duration::from_millis(50));
//! assert!(!timer.is_it_time());
//! std::thread::sleep(Duration::from_millis(60));
//! assert!(timer.is_it_time());
//! timer.reset();
//! assert!(!timer.is_it_time());
//! ```

use std::time::{Duration, Instant};

/// Deadline that re-arms on [`reset`](RefreshTimer::reset).
#[derive(Clone, Copy, Debug)]
pub struct RefreshTimer {
    period: Duration,
    armed_at: Instant,
}

impl Default for RefreshTimer {
    /// Five minute period.
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}

impl RefreshTimer {
    /// Arms a timer that fires `period` from now.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed_at: Instant::now(),
        }
    }

    /// Configured period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// True once the period has elapsed since arming.
    pub fn is_it_time(&self) -> bool {
        self.armed_at.elapsed() >= self.period
    }

    /// Time left before the timer fires (zero once it has).
    pub fn remaining(&self) -> Duration {
        self.period.saturating_sub(self.armed_at.elapsed())
    }

    /// Re-arms the timer from now.
    pub fn reset(&mut self) {
        self.armed_at = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_fires_after_period() {
        let timer = RefreshTimer::new(Duration::from_millis(50));
        assert!(!timer.is_it_time());
        assert!(timer.remaining() > Duration::ZERO);
        thread::sleep(Duration::from_millis(60));
        assert!(timer.is_it_time());
        assert_eq!(timer.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_zero_period_fires_immediately() {
        assert!(RefreshTimer::new(Duration::ZERO).is_it_time());
    }

    #[test]
    fn test_reset_rearms() {
        let mut timer = RefreshTimer::new(Duration::from_millis(50));
        thread::sleep(Duration::from_millis(60));
        assert!(timer.is_it_time());
        timer.reset();
        assert!(!timer.is_it_time());
        assert_eq!(timer.period(), Duration::from_millis(50));
    }

    #[test]
    fn test_default_period() {
        assert_eq!(RefreshTimer::default().period(), Duration::from_secs(300));
    }
}
