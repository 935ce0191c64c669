//! # Poller: the poll-until-ready loop.
//!
//! Drives one action until a [`Condition`] holds, the timeout budget runs out,
//! or the action fails with error handling disabled.
//!
//! ## Event flow
//! ```text
//! Started
//!   ├─► action() ── Ok(v), condition(v)   ──► Succeeded            [SUCCESS]
//!   │             ├ Ok(v), !condition(v)  ──► AttemptFailed
//!   │             ├ Err(e), handle_errors ──► ActionErrored
//!   │             └ Err(e), !handle_errors ─► ActionAborted        [PROPAGATED_FAILURE]
//!   ├─► elapsed >= timeout ─────────────────► TimedOut             [TIMEOUT_FAILURE]
//!   ├─► BackoffScheduled ─► sleep(delay) ─► on_failure hook
//!   └─► next attempt
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially** on the calling thread; the thread blocks for
//!   the whole wait, sleeps included.
//! - The timeout is checked **before** sleeping, so a wait overruns its budget
//!   by at most one delay plus one action call.
//! - Delay state is created per [`Poller::wait`] call and advances monotonically
//!   within it.
//! - Under an exponential policy the reported elapsed time is approximate: it
//!   is the time of the check that saw the condition hold, which may be long
//!   after the condition actually became true.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::{
    core::{config::PollConfig, config::Verbosity, timeout::Timeout, wait::action_name},
    error::{ConfigError, WaitError},
    events::{Event, EventKind},
    policies::{Condition, DelayPolicy, Truthy},
    subscribers::{Subscribe, SubscriberSet},
};

/// Hook run after every unsuccessful attempt, once the delay has elapsed.
type FailureHook = Box<dyn FnMut() + Send>;

/// Successful outcome of a wait.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitResult<T> {
    /// Value that satisfied the condition.
    pub value: T,
    /// Time from the first attempt to the satisfying check.
    pub elapsed: Duration,
    /// Number of attempts made, including the satisfying one.
    pub attempts: u32,
}

impl<T> WaitResult<T> {
    /// Maps the value, keeping the timing data.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WaitResult<U> {
        WaitResult {
            value: f(self.value),
            elapsed: self.elapsed,
            attempts: self.attempts,
        }
    }

    /// Splits into `(value, elapsed)`.
    pub fn into_parts(self) -> (T, Duration) {
        (self.value, self.elapsed)
    }
}

/// Polls an action until its value satisfies a condition.
///
/// The action is any `FnMut() -> Result<T, E>`; arguments are captured by the
/// closure. Infallible actions can be adapted with
/// [`infallible`](crate::infallible).
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use waitfor::{Condition, DelayPolicy, Poller};
///
/// let mut n = 0u32;
/// let res = Poller::with_condition(
///     || { n += 1; Ok::<_, std::io::Error>(n) },
///     Condition::predicate(|v: &u32| *v >= 3),
/// )
/// .delay(DelayPolicy::linear(Duration::from_millis(1)))
/// .timeout(Duration::from_secs(1))
/// .wait()?;
///
/// assert_eq!(res.value, 3);
/// assert_eq!(res.attempts, 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Poller<F, T, E> {
    action: F,
    condition: Condition<T>,
    config: PollConfig,
    on_failure: Option<FailureHook>,
    subscribers: SubscriberSet,
    _error: PhantomData<fn() -> E>,
}

impl<F, T, E> Poller<F, T, E>
where
    F: FnMut() -> Result<T, E>,
{
    /// Polls until the value is truthy (see [`Truthy`]).
    pub fn new(action: F) -> Self
    where
        T: Truthy + 'static,
    {
        Self::with_condition(action, Condition::truthy())
    }

    /// Polls until `condition` holds.
    pub fn with_condition(action: F, condition: Condition<T>) -> Self {
        Self {
            action,
            condition,
            config: PollConfig::default(),
            on_failure: None,
            subscribers: SubscriberSet::default(),
            _error: PhantomData,
        }
    }

    /// Polls with a stored configuration.
    ///
    /// # Errors
    /// Whatever [`PollConfig::validate`] rejects.
    pub fn from_config(
        action: F,
        condition: Condition<T>,
        config: PollConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut poller = Self::with_condition(action, condition);
        poller.config = config;
        Ok(poller)
    }

    /// Sets the delay policy.
    #[must_use]
    pub fn delay(mut self, delay: DelayPolicy) -> Self {
        self.config.delay = delay;
        self
    }

    /// Sets the total time budget.
    #[must_use]
    pub fn timeout(mut self, timeout: impl Into<Timeout>) -> Self {
        self.config.timeout = timeout.into().as_duration();
        self
    }

    /// Catch action errors and keep polling (default: abort on first error).
    #[must_use]
    pub fn handle_errors(mut self, handle: bool) -> Self {
        self.config.handle_errors = handle;
        self
    }

    /// On timeout, return the action's last error if the final attempt errored.
    #[must_use]
    pub fn reraise_original(mut self, reraise: bool) -> Self {
        self.config.reraise_original = reraise;
        self
    }

    /// Describes the action in diagnostics and timeout errors.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.config.message = Some(message.into());
        self
    }

    /// Filters the events reaching subscribers.
    #[must_use]
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.config.verbosity = verbosity;
        self
    }

    /// Runs `hook` after every unsuccessful attempt, once its delay has elapsed.
    #[must_use]
    pub fn on_failure(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_failure = Some(Box::new(hook));
        self
    }

    /// Attaches an observer.
    #[must_use]
    pub fn subscribe(mut self, sub: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(sub);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Description used in diagnostics.
    ///
    /// Defaults to the action's type name, which for closures points at the
    /// function that defined them. Actions wrapped in
    /// [`infallible`](crate::infallible) are named after the wrapped closure.
    pub fn describe(&self) -> String {
        match &self.config.message {
            Some(message) => message.clone(),
            None => format!("function {}", action_name::<F>()),
        }
    }
}

impl<F, T, E> Poller<F, T, E>
where
    F: FnMut() -> Result<T, E>,
    T: fmt::Debug,
    E: fmt::Display,
{
    /// Polls until success, timeout, or an unhandled action error.
    ///
    /// Each call starts from a fresh delay sequence and a fresh clock.
    ///
    /// # Errors
    /// - [`WaitError::TimedOut`] if the budget runs out first;
    /// - [`WaitError::Action`] if the action errors with error handling
    ///   disabled, or on timeout with `reraise_original` when the final
    ///   attempt errored.
    pub fn wait(&mut self) -> Result<WaitResult<T>, WaitError<T, E>> {
        let message: Arc<str> = Arc::from(self.describe());
        let timeout = Timeout::from(self.config.timeout);
        let mut delays = self.config.delay.delays();
        let mut last: Option<T> = None;
        let mut attempts: u32 = 0;

        let started = Instant::now();
        self.publish(|| Event::new(EventKind::Started).with_message(message.clone()));

        loop {
            attempts = attempts.saturating_add(1);
            let mut last_error: Option<E> = None;

            match (self.action)() {
                Ok(value) => {
                    if self.condition.is_satisfied(&value) {
                        let elapsed = started.elapsed();
                        self.publish(|| {
                            Event::new(EventKind::Succeeded)
                                .with_message(message.clone())
                                .with_attempt(attempts)
                                .with_elapsed(elapsed)
                        });
                        return Ok(WaitResult {
                            value,
                            elapsed,
                            attempts,
                        });
                    }
                    self.publish(|| {
                        Event::new(EventKind::AttemptFailed)
                            .with_message(message.clone())
                            .with_attempt(attempts)
                            .with_elapsed(started.elapsed())
                            .with_reason(format!("{value:?}"))
                    });
                    last = Some(value);
                }
                Err(error) => {
                    if !self.config.handle_errors {
                        self.publish(|| {
                            Event::new(EventKind::ActionAborted)
                                .with_message(message.clone())
                                .with_attempt(attempts)
                                .with_elapsed(started.elapsed())
                                .with_reason(error.to_string())
                        });
                        return Err(WaitError::Action(error));
                    }
                    self.publish(|| {
                        Event::new(EventKind::ActionErrored)
                            .with_message(message.clone())
                            .with_attempt(attempts)
                            .with_elapsed(started.elapsed())
                            .with_reason(error.to_string())
                    });
                    last_error = Some(error);
                }
            }

            let elapsed = started.elapsed();
            if timeout.is_exceeded(elapsed) {
                let last_error_text = last_error.as_ref().map(|e| e.to_string());
                self.publish(|| {
                    let reason = match (&last_error_text, &last) {
                        (Some(err), _) => format!("last error: {err}"),
                        (None, last) => format!("last result: {last:?}"),
                    };
                    Event::new(EventKind::TimedOut)
                        .with_message(message.clone())
                        .with_attempt(attempts)
                        .with_elapsed(elapsed)
                        .with_reason(reason)
                });
                if self.config.reraise_original {
                    if let Some(error) = last_error {
                        return Err(WaitError::Action(error));
                    }
                }
                return Err(WaitError::TimedOut {
                    message: message.to_string(),
                    last,
                    last_error: last_error_text,
                    elapsed,
                    attempts,
                });
            }

            let delay = delays.next_delay();
            self.publish(|| {
                Event::new(EventKind::BackoffScheduled)
                    .with_message(message.clone())
                    .with_attempt(attempts)
                    .with_elapsed(elapsed)
                    .with_delay(delay)
            });
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            if let Some(hook) = self.on_failure.as_mut() {
                hook();
            }
        }
    }

    /// Builds and emits an event only if someone will see it.
    fn publish(&self, build: impl FnOnce() -> Event) {
        if self.subscribers.is_empty() {
            return;
        }
        if let Some(event) = self.config.verbosity.apply(build()) {
            self.subscribers.emit(&event);
        }
    }
}

impl<F, T, E> fmt::Debug for Poller<F, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("condition", &self.condition)
            .field("config", &self.config)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscribers::Recorder;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq)]
    struct Refused(u32);

    impl fmt::Display for Refused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "refused on attempt {}", self.0)
        }
    }

    fn fast() -> DelayPolicy {
        DelayPolicy::linear(Duration::from_millis(1))
    }

    #[test]
    fn test_returns_after_exactly_n_attempts() {
        let mut calls = 0u32;
        let res = Poller::with_condition(
            || {
                calls += 1;
                Ok::<_, Refused>(calls)
            },
            Condition::equals(4),
        )
        .delay(fast())
        .wait()
        .unwrap();

        assert_eq!(res.value, 4);
        assert_eq!(res.attempts, 4);
        assert!(res.elapsed >= Duration::from_millis(3));
    }

    #[test]
    fn test_truthy_default_condition() {
        let mut calls = 0u32;
        let res = Poller::new(|| {
            calls += 1;
            Ok::<_, Refused>(calls >= 2)
        })
        .delay(fast())
        .wait()
        .unwrap();
        assert!(res.value);
        assert_eq!(res.attempts, 2);
    }

    #[test]
    fn test_unhandled_error_aborts_on_first_attempt() {
        let mut calls = 0u32;
        let err = Poller::with_condition(
            || {
                calls += 1;
                Err::<u32, _>(Refused(calls))
            },
            Condition::equals(1),
        )
        .delay(fast())
        .timeout(Duration::from_secs(5))
        .wait()
        .unwrap_err();

        assert!(matches!(err, WaitError::Action(Refused(1))));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_handled_errors_keep_polling() {
        let mut calls = 0u32;
        let res = Poller::with_condition(
            || {
                calls += 1;
                if calls < 3 { Err(Refused(calls)) } else { Ok(calls) }
            },
            Condition::equals(3),
        )
        .delay(fast())
        .handle_errors(true)
        .wait()
        .unwrap();

        assert_eq!(res.value, 3);
        assert_eq!(res.attempts, 3);
    }

    #[test]
    fn test_zero_timeout_makes_one_attempt() {
        let mut calls = 0u32;
        let err = Poller::with_condition(
            || {
                calls += 1;
                Ok::<_, Refused>(0u32)
            },
            Condition::equals(1),
        )
        .delay(fast())
        .timeout(Duration::ZERO)
        .wait()
        .unwrap_err();

        assert_eq!(calls, 1);
        assert_eq!(err.attempts(), Some(1));
        assert_eq!(err.last(), Some(&0));
    }

    #[test]
    fn test_timeout_keeps_last_value_across_handled_errors() {
        let mut calls = 0u32;
        let err = Poller::with_condition(
            || {
                calls += 1;
                if calls == 1 { Ok(7u32) } else { Err(Refused(calls)) }
            },
            Condition::equals(0),
        )
        .delay(fast())
        .timeout(Duration::from_millis(20))
        .handle_errors(true)
        .wait()
        .unwrap_err();

        match err {
            WaitError::TimedOut { last, last_error, .. } => {
                assert_eq!(last, Some(7));
                assert!(last_error.unwrap().starts_with("refused on attempt"));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_reraise_original_returns_action_error() {
        let err = Poller::with_condition(|| Err::<u32, _>(Refused(0)), Condition::equals(1))
            .delay(fast())
            .timeout(Duration::from_millis(10))
            .handle_errors(true)
            .reraise_original(true)
            .wait()
            .unwrap_err();
        assert!(matches!(err, WaitError::Action(Refused(0))));
    }

    #[test]
    fn test_reraise_original_without_error_still_times_out() {
        let err = Poller::with_condition(|| Ok::<_, Refused>(0u32), Condition::equals(1))
            .delay(fast())
            .timeout(Duration::from_millis(10))
            .reraise_original(true)
            .wait()
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_on_failure_runs_after_each_miss() {
        let misses = Arc::new(AtomicU32::new(0));
        let counter = misses.clone();
        let mut calls = 0u32;
        Poller::with_condition(
            || {
                calls += 1;
                Ok::<_, Refused>(calls)
            },
            Condition::equals(3),
        )
        .delay(fast())
        .on_failure(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .wait()
        .unwrap();

        assert_eq!(misses.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_event_sequence_for_handled_error_then_success() {
        let rec = Arc::new(Recorder::new());
        let mut calls = 0u32;
        Poller::with_condition(
            || {
                calls += 1;
                match calls {
                    1 => Err(Refused(1)),
                    2 => Ok(0u32),
                    _ => Ok(1),
                }
            },
            Condition::equals(1),
        )
        .delay(fast())
        .handle_errors(true)
        .message("probe")
        .subscribe(rec.clone())
        .wait()
        .unwrap();

        assert_eq!(
            rec.kinds(),
            vec![
                EventKind::Started,
                EventKind::ActionErrored,
                EventKind::BackoffScheduled,
                EventKind::AttemptFailed,
                EventKind::BackoffScheduled,
                EventKind::Succeeded,
            ]
        );
        let errored = rec.last_of(EventKind::ActionErrored).unwrap();
        assert_eq!(errored.reason.as_deref(), Some("refused on attempt 1"));
        assert_eq!(errored.message.as_deref(), Some("probe"));
        assert_eq!(rec.last_of(EventKind::AttemptFailed).unwrap().reason.as_deref(), Some("0"));
    }

    #[test]
    fn test_very_quiet_only_reports_errors() {
        let rec = Arc::new(Recorder::new());
        let mut calls = 0u32;
        Poller::with_condition(
            || {
                calls += 1;
                if calls == 1 { Err(Refused(1)) } else { Ok(calls) }
            },
            Condition::equals(3),
        )
        .delay(fast())
        .handle_errors(true)
        .verbosity(Verbosity::VeryQuiet)
        .subscribe(rec.clone())
        .wait()
        .unwrap();

        assert_eq!(rec.kinds(), vec![EventKind::ActionErrored]);
    }

    #[test]
    fn test_wait_restarts_delay_sequence() {
        let delay = DelayPolicy::exponential(Duration::from_millis(1), Duration::from_millis(8)).unwrap();
        let rec = Arc::new(Recorder::new());
        let mut calls = 0u32;
        let mut poller = Poller::with_condition(
            move || {
                calls += 1;
                Ok::<_, Refused>(calls % 3 == 0)
            },
            Condition::equals(true),
        )
        .delay(delay)
        .subscribe(rec.clone());

        poller.wait().unwrap();
        poller.wait().unwrap();

        let delays: Vec<_> = rec
            .events()
            .into_iter()
            .filter_map(|e| e.delay)
            .collect();
        let ms = Duration::from_millis;
        assert_eq!(delays, vec![ms(1), ms(2), ms(1), ms(2)]);
    }

    #[test]
    fn test_default_message_names_the_closure() {
        let poller = Poller::new(|| Ok::<_, Refused>(true));
        assert!(poller.describe().starts_with("function "));
        assert!(poller.describe().contains("closure"), "{}", poller.describe());
    }

    #[test]
    fn test_default_message_looks_through_infallible() {
        let poller = Poller::new(crate::infallible(|| true));
        let text = poller.describe();
        assert!(!text.contains("infallible"), "{text}");
        assert!(
            text.contains("test_default_message_looks_through_infallible"),
            "{text}"
        );
    }

    #[test]
    fn test_from_config_rejects_invalid_delay() {
        let config = PollConfig {
            delay: DelayPolicy::Exponential {
                base: Duration::from_secs(2),
                max: Duration::from_secs(1),
            },
            ..PollConfig::default()
        };
        let res = Poller::from_config(|| Ok::<_, Refused>(1u32), Condition::equals(1), config);
        assert!(matches!(res, Err(ConfigError::CeilingBelowBase { .. })));
    }
}
