//! Polling policies.
//!
//! This module groups the knobs that control **when** a wait ends and **how
//! long** to sleep between attempts.
//!
//! ## Contents
//! - [`Condition`]   when a value returned by the action ends the wait
//! - [`DelayPolicy`] how delays evolve (linear / exponential with ceiling)
//! - [`Delays`]      the per-wait stateful delay sequence
//! - [`Truthy`]      the "non-empty value" notion behind the default condition
//!
//! ## Quick wiring
//! ```text
//! Poller { condition: Condition<T>, config: PollConfig { delay: DelayPolicy, .. } }
//!      └─► core::poller::Poller::wait uses:
//!           - condition.is_satisfied(&value) to decide success
//!           - delay.delays().next_delay() to schedule the next attempt
//! ```
//!
//! ## Defaults
//! - `Condition::truthy()` when no condition is given.
//! - `DelayPolicy::default()` → linear, 1s.

mod condition;
mod delay;

pub use condition::{Condition, PredicateFn, Truthy};
pub use delay::{DelayPolicy, Delays};
