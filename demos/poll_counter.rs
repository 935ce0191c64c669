//! # Example: poll_counter
//!
//! Polls a slow counter until it passes a threshold, with a fixed delay.
//!
//! ## Flow
//! ```text
//! Poller::wait()
//!   ├─► counter() → 1  → AttemptFailed, BackoffScheduled{50ms}
//!   ├─► counter() → 2  → AttemptFailed, BackoffScheduled{50ms}
//!   ├─► ...
//!   └─► counter() → 5  → Succeeded
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example poll_counter
//! ```

use std::{sync::Arc, thread, time::Duration};

use tracing_subscriber::EnvFilter;
use waitfor::{Condition, DelayPolicy, LogWriter, Poller, infallible};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. An action that takes a while and counts up
    let mut value = 0u32;
    let counter = move || {
        thread::sleep(Duration::from_millis(20));
        value += 1;
        value
    };

    // 2. Poll until it reaches 5, giving up after two seconds
    let res = Poller::with_condition(
        infallible(counter),
        Condition::predicate(|v: &u32| *v >= 5),
    )
    .delay(DelayPolicy::linear(Duration::from_millis(50)))
    .timeout("2s".parse::<waitfor::Timeout>()?)
    .message("slow counter")
    .subscribe(Arc::new(LogWriter::new()))
    .wait()?;

    println!(
        "counter reached {} after {} attempts in {:?}",
        res.value, res.attempts, res.elapsed
    );
    Ok(())
}
