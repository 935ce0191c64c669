//! # Example: refresh_timer
//!
//! A hand-written loop that does its own work but refreshes a cached value
//! every 200ms, using [`RefreshTimer`] as the deadline.
//!
//! ## Run
//! ```bash
//! cargo run --example refresh_timer
//! ```

use std::{thread, time::Duration};

use waitfor::RefreshTimer;

fn main() {
    let mut timer = RefreshTimer::new(Duration::from_millis(200));
    let mut refreshes = 0;

    for tick in 0..20 {
        if timer.is_it_time() {
            refreshes += 1;
            println!("[tick {tick}] refreshing cache (#{refreshes})");
            timer.reset();
        }
        thread::sleep(Duration::from_millis(50));
    }

    println!("done: {refreshes} refreshes");
}
