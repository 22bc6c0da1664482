// gensizes/src/utils/mod.rs
pub mod ratelimit;

pub use ratelimit::{Clock, MonotonicClock, RateLimited};

use std::time::Duration;

/// Counters behind the progress line.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    /// Input lines consumed so far in this run, skipped ones included.
    pub done: u64,
    /// Lines in the input file.
    pub total: u64,
    /// Time spent since the run started.
    pub elapsed: Duration,
}

impl Progress {
    /// Linear extrapolation of the time left, in minutes.
    pub fn remaining_minutes(&self) -> f64 {
        if self.done == 0 {
            return 0.0;
        }

        let ratio = self.total as f64 / self.done as f64 - 1.0;
        (ratio * self.elapsed.as_secs_f64() / 60.0).max(0.0)
    }

    /// `<done>/<total>, <minutes> min remaining`
    pub fn message(&self) -> String {
        format!(
            "{}/{}, {} min remaining",
            self.done,
            self.total,
            format_minutes(self.remaining_minutes())
        )
    }
}

pub fn format_minutes(minutes: f64) -> String {
    format!("{:.1}", minutes)
}
