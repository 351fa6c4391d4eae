// LuxWatch — Moving-Average Filter
//
// Fixed ring of the last HISTORY_LEN readings. Only slots holding a positive
// value take part in the mean, so a true 0 lx reading counts as "no data".

use crate::config::HISTORY_LEN;

pub struct MovingAverage {
    history: [Option<f32>; HISTORY_LEN],
    next: usize,
}

impl MovingAverage {
    pub const fn new() -> Self {
        Self {
            history: [None; HISTORY_LEN],
            next: 0,
        }
    }

    /// Store `value` in the next slot (oldest overwritten first) and return
    /// the smoothed value. Falls back to `value` when no slot is positive.
    pub fn record(&mut self, value: f32) -> f32 {
        self.history[self.next] = Some(value);
        self.next = (self.next + 1) % HISTORY_LEN;

        let (sum, count) = self
            .history
            .iter()
            .flatten()
            .filter(|v| **v > 0.0)
            .fold((0.0f32, 0u32), |(sum, count), v| (sum + v, count + 1));

        if count > 0 {
            sum / count as f32
        } else {
            value
        }
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new()
    }
}
