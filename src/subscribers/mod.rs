//! # Event subscribers for the poller.
//!
//! This module provides the [`Subscribe`] trait and built-in implementations
//! for handling the [`Event`](crate::Event)s a wait emits.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Poller::wait ── emit(Event) ──► SubscriberSet ──► Subscribe::on_event(&Event)
//!                                                        │
//!                                                  ┌─────┴─────┬─────────┐
//!                                                  ▼           ▼         ▼
//!                                              LogWriter   Recorder   Custom
//! ```
//!
//! A poller without subscribers emits nothing: diagnostics are opt-in.

mod recorder;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use recorder::Recorder;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
