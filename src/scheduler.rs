// LuxWatch — Sampling Scheduler
//
// Fixed wall-clock cadence on a wrapping millisecond counter. Ticks missed
// while the loop was blocked are dropped, never replayed.

/// Source of wall-clock time and the loop's single suspension point.
pub trait Clock {
    /// Milliseconds since boot (wraps at ~49 days).
    fn now_ms(&self) -> u32;

    /// Yield the CPU for `ms` milliseconds.
    fn pause(&mut self, ms: u32);
}

pub struct Scheduler {
    interval_ms: u32,
    last_fire_ms: u32,
}

impl Scheduler {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_fire_ms: 0,
        }
    }

    /// Returns `true` at most once per interval. Wrap-safe across the u32
    /// rollover of the millisecond counter.
    pub fn tick(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_fire_ms) >= self.interval_ms {
            self.last_fire_ms = now_ms;
            true
        } else {
            false
        }
    }
}
