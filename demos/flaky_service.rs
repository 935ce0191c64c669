//! # Example: flaky_service
//!
//! Waits for a service that refuses connections a few times before answering.
//! Errors are handled (logged and retried) and delays grow exponentially.
//!
//! ## Flow
//! ```text
//! Poller::wait()
//!   ├─► probe() → Err("connection refused") → ActionErrored, BackoffScheduled{100ms}
//!   ├─► probe() → Err("connection refused") → ActionErrored, BackoffScheduled{200ms}
//!   ├─► probe() → Ok(Status::Starting)      → AttemptFailed, BackoffScheduled{400ms}
//!   └─► probe() → Ok(Status::Ready)         → Succeeded
//! ```
//!
//! The reported elapsed time is approximate: the service may have become ready
//! at any point during the last 400ms delay.
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example flaky_service
//! ```

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use tracing_subscriber::EnvFilter;
use waitfor::{Condition, DelayPolicy, LogWriter, Poller, WaitError};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Starting,
    Ready,
}

#[derive(Debug)]
struct Refused;

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("connection refused")
    }
}

static PROBES: AtomicU32 = AtomicU32::new(0);

fn probe() -> Result<Status, Refused> {
    match PROBES.fetch_add(1, Ordering::Relaxed) + 1 {
        1 | 2 => Err(Refused),
        3 => Ok(Status::Starting),
        _ => Ok(Status::Ready),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let res = Poller::with_condition(probe, Condition::equals(Status::Ready))
        .delay(DelayPolicy::exponential(
            Duration::from_millis(100),
            Duration::from_secs(1),
        )?)
        .timeout(Duration::from_secs(10))
        .handle_errors(true)
        .message("service health probe")
        .subscribe(Arc::new(LogWriter::new()))
        .wait();

    match res {
        Ok(res) => println!("ready after {} attempts (~{:?})", res.attempts, res.elapsed),
        Err(WaitError::TimedOut { last, .. }) => println!("gave up; last status {last:?}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
