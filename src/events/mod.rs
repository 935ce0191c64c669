//! Polling events.
//!
//! This module holds the event **data model** published by
//! [`Poller::wait`](crate::Poller::wait) to its subscribers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//!
//! ## Quick reference
//! - **Publisher**: `core::poller::Poller::wait`, through its `SubscriberSet`.
//! - **Consumers**: any [`Subscribe`](crate::Subscribe) implementation attached to the poller.

mod event;

pub use event::{Event, EventKind};
