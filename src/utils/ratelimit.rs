// gensizes/src/utils/ratelimit.rs
use std::time::{Duration, Instant};

/// Source of the current time for [`RateLimited`].
///
/// Any `Fn() -> Duration` is a clock, which is what tests use to drive the
/// limiter with simulated time.
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<F> Clock for F
where
    F: Fn() -> Duration,
{
    fn now(&self) -> Duration {
        self()
    }
}

/// Monotonic time since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Wraps a function so it runs at most once every `every` calls and at most
/// once per `interval`. Both limits have to allow a call for it to go
/// through, and a call that goes through resets both. A zero value turns
/// the corresponding limit off.
///
/// The limiter starts primed: the very first call always runs.
pub struct RateLimited<F, C> {
    f: F,
    clock: C,
    every: u64,
    interval: Duration,
    calls: u64,
    last_fired: Option<Duration>,
}

impl<F, C: Clock> RateLimited<F, C> {
    pub fn new(f: F, clock: C) -> Self {
        Self {
            f,
            clock,
            every: 0,
            interval: Duration::ZERO,
            calls: 0,
            last_fired: None,
        }
    }

    pub fn every(mut self, calls: u64) -> Self {
        self.every = calls;
        self.calls = calls;
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Calls the wrapped function if both limits allow it. Returns whether
    /// it ran.
    pub fn call<A>(&mut self, arg: A) -> bool
    where
        F: FnMut(A),
    {
        if self.every > 0 {
            self.calls = self.calls.saturating_add(1);
        }
        let count_ok = self.calls >= self.every;

        let now = if self.interval.is_zero() {
            None
        } else {
            Some(self.clock.now())
        };
        let time_ok = match (now, self.last_fired) {
            (Some(now), Some(last)) => now.saturating_sub(last) >= self.interval,
            _ => true,
        };

        if !(count_ok && time_ok) {
            return false;
        }

        self.calls = 0;
        if now.is_some() {
            self.last_fired = now;
        }
        (self.f)(arg);
        true
    }
}
