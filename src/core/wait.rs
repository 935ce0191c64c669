//! # One-call helpers over [`Poller`].
//!
//! - [`wait_for`] polls an infallible action until its value is truthy.
//! - [`wait_until`] polls an `Option`-returning probe until it yields `Some`.
//! - [`infallible`] adapts `FnMut() -> T` into the `FnMut() -> Result<T, E>`
//!   shape the poller drives.

use std::convert::Infallible;
use std::fmt;

use crate::{
    core::{poller::Poller, poller::WaitResult, timeout::Timeout},
    error::WaitError,
    policies::{Condition, DelayPolicy, Truthy},
};

/// Adapts an action that cannot fail.
///
/// ```rust
/// use std::time::Duration;
/// use waitfor::{infallible, Condition, DelayPolicy, Poller};
///
/// let mut ticks = 0u8;
/// let res = Poller::with_condition(infallible(|| { ticks += 1; ticks }), Condition::equals(2))
///     .delay(DelayPolicy::linear(Duration::ZERO))
///     .wait()
///     .unwrap();
/// assert_eq!(res.attempts, 2);
/// ```
pub fn infallible<T>(mut action: impl FnMut() -> T) -> impl FnMut() -> Result<T, Infallible> {
    move || Ok(action())
}

/// Type name prefix of the closure returned by [`infallible`].
const ADAPTER_PREFIX: &str = concat!(module_path!(), "::infallible<");

/// Type name of the action `F`, looking through the [`infallible`] adapter.
///
/// The adapter renders as `..::infallible<T, Inner>::{{closure}}`; the last
/// top-level generic argument is the caller's closure.
pub(crate) fn action_name<F>() -> &'static str {
    let name = std::any::type_name::<F>();
    let Some(args) = name
        .strip_prefix(ADAPTER_PREFIX)
        .and_then(|rest| rest.strip_suffix(">::{{closure}}"))
    else {
        return name;
    };

    let mut depth = 0usize;
    let mut split = None;
    let mut prev = ' ';
    for (i, c) in args.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' if prev == '-' => {}
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => split = Some(i),
            _ => {}
        }
        prev = c;
    }
    match split {
        Some(i) => args[i + 1..].trim_start(),
        None => name,
    }
}

/// Polls `action` until it returns a truthy value.
///
/// # Errors
/// [`WaitError::TimedOut`] if the value stays falsy for the whole budget.
pub fn wait_for<T>(
    action: impl FnMut() -> T,
    timeout: impl Into<Timeout>,
    delay: DelayPolicy,
) -> Result<WaitResult<T>, WaitError<T, Infallible>>
where
    T: Truthy + fmt::Debug + 'static,
{
    Poller::new(infallible(action))
        .timeout(timeout)
        .delay(delay)
        .wait()
}

/// Polls `probe` until it yields `Some`, and returns the inner value.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use waitfor::{wait_until, DelayPolicy};
///
/// let mut queue = vec![None, None, Some("ready")].into_iter();
/// let res = wait_until(
///     || queue.next().flatten(),
///     Duration::from_secs(1),
///     DelayPolicy::linear(Duration::from_millis(1)),
/// )?;
/// assert_eq!(res.value, "ready");
/// assert_eq!(res.attempts, 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// [`WaitError::TimedOut`] if the probe keeps returning `None`.
pub fn wait_until<R>(
    mut probe: impl FnMut() -> Option<R>,
    timeout: impl Into<Timeout>,
    delay: DelayPolicy,
) -> Result<WaitResult<R>, WaitError<(), Infallible>> {
    let mut ready: Option<R> = None;
    let outcome = Poller::with_condition(
        || {
            ready = probe();
            Ok::<bool, Infallible>(ready.is_some())
        },
        Condition::equals(true),
    )
    .timeout(timeout)
    .delay(delay)
    .wait();

    match outcome {
        Ok(result) => match ready {
            Some(value) => Ok(result.map(|_| value)),
            None => unreachable!("condition holds only when the probe returned Some"),
        },
        Err(WaitError::TimedOut {
            message,
            last_error,
            elapsed,
            attempts,
            ..
        }) => Err(WaitError::TimedOut {
            message,
            last: None,
            last_error,
            elapsed,
            attempts,
        }),
        Err(WaitError::Action(never)) => match never {},
    }
}
