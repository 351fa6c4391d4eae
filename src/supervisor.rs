// LuxWatch — Connection Supervisor
//
// Tracks sensor and display liveness. While the sensor is down every
// scheduler tick counts as one failed attempt: the LED blinks a heartbeat and
// every RECONNECT_EVERY-th attempt re-runs the bring-up probe. Retries never
// stop.

use crate::config::*;
use crate::drivers::{Indicator, LightSensor};
use crate::events::Reading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Connected,
    Disconnected,
}

impl Link {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Connected    => "CONNECTED",
            Self::Disconnected => "NOT CONNECTED",
        }
    }
}

pub struct ConnectionSupervisor {
    sensor: Link,
    display: Link,
    error_count: u32,
    invalid_streak: u32,
}

impl ConnectionSupervisor {
    /// Start from the links reported by the startup bring-up probes. The
    /// display link is fixed from here on.
    pub fn new(sensor: Link, display: Link) -> Self {
        Self {
            sensor,
            display,
            error_count: 0,
            invalid_streak: 0,
        }
    }

    pub fn sensor(&self) -> Link {
        self.sensor
    }

    pub fn display(&self) -> Link {
        self.display
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Account for a read taken while the sensor is connected. An invalid
    /// reading is transient; only DROPOUT_LIMIT in a row drop the link.
    pub fn record_read(&mut self, reading: &Reading) {
        match reading {
            Reading::Valid(_) => self.invalid_streak = 0,
            Reading::Invalid => {
                self.error_count = self.error_count.wrapping_add(1);
                self.invalid_streak += 1;
                log::warn!(
                    "BH1750 read invalid ({} in a row, {} errors total)",
                    self.invalid_streak,
                    self.error_count
                );

                if self.invalid_streak >= DROPOUT_LIMIT {
                    log::error!("BH1750 dropped out after {} invalid reads", self.invalid_streak);
                    // Reconnect attempts count from 1 again, as at startup.
                    self.sensor = Link::Disconnected;
                    self.error_count = 0;
                    self.invalid_streak = 0;
                }
            }
        }
    }

    /// One failed cycle with the sensor disconnected: heartbeat on the
    /// indicator and, every RECONNECT_EVERY attempts, a fresh bring-up probe.
    pub fn retry<S, I>(&mut self, sensor: &mut S, indicator: &mut I)
    where
        S: LightSensor,
        I: Indicator,
    {
        self.error_count = self.error_count.wrapping_add(1);
        log::warn!(
            "BH1750 not connected! Attempt {}. Please check wiring.",
            self.error_count
        );

        indicator.set(self.heartbeat());

        if self.error_count % RECONNECT_EVERY == 0 {
            log::info!("Attempting to reconnect to BH1750...");
            if sensor.probe(I2C_ADDR_BH1750, I2C_ADDR_BH1750_ALT).is_connected() {
                log::info!("BH1750 reconnected after {} attempts", self.error_count);
                self.sensor = Link::Connected;
                self.error_count = 0;
                self.invalid_streak = 0;
            }
        }
    }

    /// Heartbeat level: alternates with every failed attempt.
    pub fn heartbeat(&self) -> bool {
        self.error_count % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSensor {
        probes: u32,
        comes_back: bool,
    }

    impl LightSensor for FakeSensor {
        fn probe(&mut self, primary: u8, fallback: u8) -> Link {
            assert_eq!((primary, fallback), (I2C_ADDR_BH1750, I2C_ADDR_BH1750_ALT));
            self.probes += 1;
            if self.comes_back {
                Link::Connected
            } else {
                Link::Disconnected
            }
        }

        fn read(&mut self) -> Reading {
            Reading::Invalid
        }
    }

    #[derive(Default)]
    struct Led {
        levels: Vec<bool>,
    }

    impl Indicator for Led {
        fn set(&mut self, on: bool) {
            self.levels.push(on);
        }
    }

    #[test]
    fn reconnects_on_tenth_attempt() {
        let mut sup = ConnectionSupervisor::new(Link::Disconnected, Link::Connected);
        let mut sensor = FakeSensor { probes: 0, comes_back: true };
        let mut led = Led::default();

        for _ in 0..9 {
            sup.retry(&mut sensor, &mut led);
        }
        assert_eq!(sensor.probes, 0);
        assert_eq!(sup.error_count(), 9);

        sup.retry(&mut sensor, &mut led);
        assert_eq!(sensor.probes, 1);
        assert_eq!(sup.sensor(), Link::Connected);
        assert_eq!(sup.error_count(), 0);
    }

    #[test]
    fn keeps_retrying_without_a_ceiling() {
        let mut sup = ConnectionSupervisor::new(Link::Disconnected, Link::Disconnected);
        let mut sensor = FakeSensor { probes: 0, comes_back: false };
        let mut led = Led::default();

        for _ in 0..100 {
            sup.retry(&mut sensor, &mut led);
        }
        assert_eq!(sensor.probes, 10);
        assert_eq!(sup.error_count(), 100);
        assert_eq!(sup.sensor(), Link::Disconnected);
    }

    #[test]
    fn heartbeat_alternates() {
        let mut sup = ConnectionSupervisor::new(Link::Disconnected, Link::Disconnected);
        let mut sensor = FakeSensor { probes: 0, comes_back: false };
        let mut led = Led::default();

        for _ in 0..4 {
            sup.retry(&mut sensor, &mut led);
        }
        assert_eq!(led.levels, vec![true, false, true, false]);
    }

    #[test]
    fn single_invalid_read_is_transient() {
        let mut sup = ConnectionSupervisor::new(Link::Connected, Link::Connected);
        sup.record_read(&Reading::Invalid);
        assert_eq!(sup.sensor(), Link::Connected);
        assert_eq!(sup.error_count(), 1);

        sup.record_read(&Reading::Valid(12.0));
        assert_eq!(sup.error_count(), 1);
    }

    #[test]
    fn consecutive_invalid_reads_drop_the_sensor() {
        let mut sup = ConnectionSupervisor::new(Link::Connected, Link::Connected);
        for _ in 0..DROPOUT_LIMIT - 1 {
            sup.record_read(&Reading::Invalid);
        }
        assert_eq!(sup.sensor(), Link::Connected);

        sup.record_read(&Reading::Invalid);
        assert_eq!(sup.sensor(), Link::Disconnected);
        assert_eq!(sup.error_count(), 0);
    }

    #[test]
    fn earlier_transient_errors_do_not_shift_the_reconnect_cadence() {
        let mut sup = ConnectionSupervisor::new(Link::Connected, Link::Connected);
        for _ in 0..RECONNECT_EVERY - 1 {
            sup.record_read(&Reading::Invalid);
            sup.record_read(&Reading::Valid(40.0));
        }
        for _ in 0..DROPOUT_LIMIT {
            sup.record_read(&Reading::Invalid);
        }
        assert_eq!(sup.sensor(), Link::Disconnected);

        let mut sensor = FakeSensor { probes: 0, comes_back: true };
        let mut led = Led::default();
        for _ in 0..RECONNECT_EVERY - 1 {
            sup.retry(&mut sensor, &mut led);
        }
        assert_eq!(sensor.probes, 0);
        assert!(led.levels[0]);

        sup.retry(&mut sensor, &mut led);
        assert_eq!(sensor.probes, 1);
        assert_eq!(sup.sensor(), Link::Connected);
    }

    #[test]
    fn valid_read_breaks_the_streak() {
        let mut sup = ConnectionSupervisor::new(Link::Connected, Link::Connected);
        for _ in 0..DROPOUT_LIMIT - 1 {
            sup.record_read(&Reading::Invalid);
        }
        sup.record_read(&Reading::Valid(3.0));
        sup.record_read(&Reading::Invalid);
        assert_eq!(sup.sensor(), Link::Connected);
    }

    #[test]
    fn display_link_is_fixed() {
        let sup = ConnectionSupervisor::new(Link::Connected, Link::Disconnected);
        assert_eq!(sup.display(), Link::Disconnected);
        assert_eq!(Link::Disconnected.status(), "NOT CONNECTED");
    }
}
