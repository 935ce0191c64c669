//! # Example: custom_subscriber
//!
//! Demonstrates how to build and attach a custom event subscriber.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait.
//! - Inspect [`Event`] / [`EventKind`] to print progress and count errors.
//! - Wire the subscriber into [`Poller::subscribe`].
//!
//! ## Flow
//! ```text
//! Poller::wait()
//!     ├─► emit(Started)
//!     ├─► action() ─► emit(ActionErrored | AttemptFailed)
//!     ├─► emit(BackoffScheduled) ─► sleep
//!     └─► emit(Succeeded | TimedOut)
//!           └─► SubscriberSet.emit() ──► ConsoleSubscriber.on_event()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_subscriber
//! ```

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use waitfor::{Condition, DelayPolicy, Event, EventKind, Poller, Subscribe};

/// Prints selected events and counts handled errors.
/// In real life, you could export metrics or ship logs instead.
#[derive(Default)]
struct ConsoleSubscriber {
    errors: AtomicUsize,
}

impl Subscribe for ConsoleSubscriber {
    fn on_event(&self, ev: &Event) {
        let name = ev.message.as_deref().unwrap_or("<unknown>");
        match ev.kind {
            EventKind::Started => println!("[sub] started:  {name}"),
            EventKind::AttemptFailed => println!(
                "[sub] missed:   {name} attempt={} got={}",
                ev.attempt.unwrap_or(0),
                ev.reason.as_deref().unwrap_or("?")
            ),
            EventKind::ActionErrored => {
                self.errors.fetch_add(1, Ordering::Relaxed);
                println!(
                    "[sub] errored:  {name} attempt={} err={}",
                    ev.attempt.unwrap_or(0),
                    ev.reason.as_deref().unwrap_or("?")
                );
            }
            EventKind::BackoffScheduled => {
                println!("[sub] backoff:  {name} delay={:?}", ev.delay.unwrap_or_default())
            }
            EventKind::Succeeded => {
                println!("[sub] done:     {name} in {:?}", ev.elapsed.unwrap_or_default())
            }
            EventKind::TimedOut | EventKind::ActionAborted => {
                println!("[sub] gave up:  {name} ({})", ev.kind.as_label())
            }
        }
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let console = Arc::new(ConsoleSubscriber::default());

    let mut reads = 0;
    let res = Poller::with_condition(
        || {
            reads += 1;
            match reads {
                1 => Err("file locked"),
                2 => Ok(String::new()),
                _ => Ok("payload".to_string()),
            }
        },
        Condition::predicate(|s: &String| !s.is_empty()),
    )
    .delay(DelayPolicy::linear(Duration::from_millis(100)))
    .timeout(Duration::from_secs(3))
    .handle_errors(true)
    .message("read output file")
    .subscribe(console.clone())
    .wait()?;

    println!(
        "read {:?} after {} attempts; {} handled errors",
        res.value,
        res.attempts,
        console.errors.load(Ordering::Relaxed)
    );
    Ok(())
}
