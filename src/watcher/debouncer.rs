//! Debouncing for route config change events.
//!
//! Editors often emit several events per save (truncate, write, chmod,
//! rename). The debouncer collapses a burst into one reload once the file
//! has been quiet for the configured duration.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    /// Time of the most recent unprocessed change.
    last_change: Option<Instant>,
    /// Quiet period required before a change is released.
    duration: Duration,
}

impl Debouncer {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            last_change: None,
            duration: Duration::from_millis(debounce_ms),
        }
    }

    /// Record a change, restarting the quiet period.
    pub fn record(&mut self) {
        self.last_change = Some(Instant::now());
    }

    /// Returns true once per burst, after the quiet period has elapsed.
    pub fn take_ready(&mut self) -> bool {
        match self.last_change {
            Some(at) if at.elapsed() >= self.duration => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }

    /// How often a caller should poll [`take_ready`](Self::take_ready).
    pub fn poll_interval(&self) -> Duration {
        (self.duration / 2).max(Duration::from_millis(10))
    }
}
