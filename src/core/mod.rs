//! Poller core: the loop and its configuration.
//!
//! The public API from this module is [`Poller`] plus the one-call helpers
//! built on it.
//!
//! Internal modules:
//! - [`poller`]: the poll-until-ready loop, builder and [`WaitResult`];
//! - [`config`]: [`PollConfig`] and [`Verbosity`];
//! - [`timeout`]: the [`Timeout`] budget and its parsing;
//! - [`wait`]: [`wait_for`], [`wait_until`] and the [`infallible`] adapter;
//! - [`refresh`]: [`RefreshTimer`], a reusable deadline.

mod config;
mod poller;
mod refresh;
mod timeout;
mod wait;

pub use config::{PollConfig, Verbosity};
pub use poller::{Poller, WaitResult};
pub use refresh::RefreshTimer;
pub use timeout::Timeout;
pub use wait::{infallible, wait_for, wait_until};
