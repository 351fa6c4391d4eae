// LuxWatch — Monitor Task
//
// The single control loop. Owns every piece of state (history, links,
// schedule) and runs one sample-classify-render-actuate cycle per tick:
//
//   tick -> sensor connected?
//             yes: read -> filter -> classify -> console, OLED, LED
//             no:  heartbeat on LED, periodic reconnect probe
//
// Runs until power-off; nothing here returns an error.

use crate::actuator;
use crate::classifier::classify;
use crate::config::*;
use crate::drivers::{Indicator, LightSensor};
use crate::events::{Reading, SampleCycle};
use crate::filter::MovingAverage;
use crate::render::Renderer;
use crate::scheduler::{Clock, Scheduler};
use crate::supervisor::{ConnectionSupervisor, Link};

pub struct Monitor<S, L, C, G> {
    sensor: S,
    led: L,
    console: C,
    display: Option<G>,
    scheduler: Scheduler,
    filter: MovingAverage,
    supervisor: ConnectionSupervisor,
}

impl<S, L, C, G> Monitor<S, L, C, G>
where
    S: LightSensor,
    L: Indicator,
    C: Renderer,
    G: Renderer,
{
    /// `sensor_link` is the result of the startup probe; the display is
    /// connected iff `display` is present.
    pub fn new(sensor: S, sensor_link: Link, led: L, console: C, display: Option<G>) -> Self {
        let display_link = if display.is_some() {
            Link::Connected
        } else {
            Link::Disconnected
        };

        Self {
            sensor,
            led,
            console,
            display,
            scheduler: Scheduler::new(SAMPLE_INTERVAL_MS),
            filter: MovingAverage::new(),
            supervisor: ConnectionSupervisor::new(sensor_link, display_link),
        }
    }

    pub fn supervisor(&self) -> &ConnectionSupervisor {
        &self.supervisor
    }

    /// Poll once. Returns the cycle when the scheduler fired and the sensor
    /// produced a usable reading.
    pub fn poll(&mut self, now_ms: u32) -> Option<SampleCycle> {
        if !self.scheduler.tick(now_ms) {
            return None;
        }

        if !self.supervisor.sensor().is_connected() {
            self.supervisor.retry(&mut self.sensor, &mut self.led);
            return None;
        }

        let reading = self.sensor.read();
        self.supervisor.record_read(&reading);
        let Reading::Valid(instant) = reading else {
            return None;
        };

        let cycle = SampleCycle {
            instant,
            smoothed: self.filter.record(instant),
            band: classify(instant),
            elapsed_s: now_ms / 1000,
        };

        self.console.render(&cycle);
        if self.supervisor.display().is_connected() {
            if let Some(display) = self.display.as_mut() {
                display.render(&cycle);
            }
        }
        self.led.set(actuator::drive(instant));

        Some(cycle)
    }

    /// Poll forever, yielding between polls.
    pub fn run<K: Clock>(&mut self, clock: &mut K) -> ! {
        log::info!("Reading light sensor every {} ms", SAMPLE_INTERVAL_MS);
        loop {
            self.poll(clock.now_ms());
            clock.pause(LOOP_PAUSE_MS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LightBand;
    use std::collections::VecDeque;

    struct ScriptedSensor {
        readings: VecDeque<Reading>,
        probes: u32,
        probe_result: Link,
    }

    impl ScriptedSensor {
        fn new(readings: &[Reading]) -> Self {
            Self {
                readings: readings.iter().copied().collect(),
                probes: 0,
                probe_result: Link::Disconnected,
            }
        }
    }

    impl LightSensor for ScriptedSensor {
        fn probe(&mut self, _primary: u8, _fallback: u8) -> Link {
            self.probes += 1;
            self.probe_result
        }

        fn read(&mut self) -> Reading {
            self.readings.pop_front().unwrap_or(Reading::Invalid)
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

    #[derive(Default)]
    struct Sink {
        cycles: Vec<SampleCycle>,
    }

    impl Renderer for Sink {
        fn render(&mut self, cycle: &SampleCycle) {
            self.cycles.push(*cycle);
        }
    }

    /// Fire `n` scheduler ticks, one interval apart.
    fn run_ticks<S, L, C, G>(m: &mut Monitor<S, L, C, G>, n: u32)
    where
        S: LightSensor,
        L: Indicator,
        C: Renderer,
        G: Renderer,
    {
        for i in 1..=n {
            m.poll(i * SAMPLE_INTERVAL_MS);
        }
    }

    #[test]
    fn steady_dark_room() {
        let (mut led, mut console, mut oled) = (Led::default(), Sink::default(), Sink::default());
        let sensor = ScriptedSensor::new(&[Reading::Valid(5.0); 10]);
        let mut m = Monitor::new(sensor, Link::Connected, &mut led, &mut console, Some(&mut oled));

        run_ticks(&mut m, 10);
        drop(m);

        assert_eq!(console.cycles.len(), 10);
        for cycle in &console.cycles {
            assert_eq!(cycle.smoothed, 5.0);
            assert_eq!(cycle.band, LightBand::VeryDark);
        }
        assert_eq!(oled.cycles, console.cycles);
        assert_eq!(led.levels, vec![true; 10]);
    }

    #[test]
    fn steady_pitch_black_uses_instant_fallback() {
        let (mut led, mut console) = (Led::default(), Sink::default());
        let sensor = ScriptedSensor::new(&[Reading::Valid(0.0); 10]);
        let mut m = Monitor::new(sensor, Link::Connected, &mut led, &mut console, None::<&mut Sink>);

        run_ticks(&mut m, 10);
        drop(m);

        assert_eq!(console.cycles.len(), 10);
        for cycle in &console.cycles {
            assert_eq!(cycle.smoothed, 0.0);
            assert_eq!(cycle.band, LightBand::PitchBlack);
        }
        assert_eq!(led.levels, vec![true; 10]);
    }

    #[test]
    fn bright_room_turns_led_off() {
        let (mut led, mut console) = (Led::default(), Sink::default());
        let sensor = ScriptedSensor::new(&[Reading::Valid(20.0), Reading::Valid(600.0)]);
        let mut m = Monitor::new(sensor, Link::Connected, &mut led, &mut console, None::<&mut Sink>);

        run_ticks(&mut m, 2);
        drop(m);

        assert_eq!(led.levels, vec![true, false]);
        assert_eq!(console.cycles[1].smoothed, 310.0);
        assert_eq!(console.cycles[1].band, LightBand::Bright);
    }

    #[test]
    fn no_work_between_ticks() {
        let (mut led, mut console) = (Led::default(), Sink::default());
        let sensor = ScriptedSensor::new(&[Reading::Valid(5.0); 3]);
        let mut m = Monitor::new(sensor, Link::Connected, &mut led, &mut console, None::<&mut Sink>);

        assert!(m.poll(1000).is_some());
        assert!(m.poll(1010).is_none());
        assert!(m.poll(1990).is_none());
        assert!(m.poll(2000).is_some());
        drop(m);

        assert_eq!(console.cycles.len(), 2);
    }

    #[test]
    fn invalid_reading_skips_the_cycle() {
        let (mut led, mut console, mut oled) = (Led::default(), Sink::default(), Sink::default());
        let sensor = ScriptedSensor::new(&[Reading::Valid(80.0), Reading::Invalid, Reading::Valid(80.0)]);
        let mut m = Monitor::new(sensor, Link::Connected, &mut led, &mut console, Some(&mut oled));

        run_ticks(&mut m, 3);
        assert_eq!(m.supervisor().error_count(), 1);
        assert_eq!(m.supervisor().sensor(), Link::Connected);
        drop(m);

        assert_eq!(console.cycles.len(), 2);
        assert_eq!(oled.cycles.len(), 2);
        assert_eq!(led.levels.len(), 2);
    }

    #[test]
    fn elapsed_time_comes_from_the_clock() {
        let (mut led, mut console) = (Led::default(), Sink::default());
        let sensor = ScriptedSensor::new(&[Reading::Valid(5.0)]);
        let mut m = Monitor::new(sensor, Link::Connected, &mut led, &mut console, None::<&mut Sink>);

        let cycle = m.poll(42_500).unwrap();
        assert_eq!(cycle.elapsed_s, 42);
    }

    #[test]
    fn disconnected_sensor_blinks_and_reconnects() {
        let (mut led, mut console) = (Led::default(), Sink::default());
        let mut sensor = ScriptedSensor::new(&[Reading::Valid(700.0)]);
        sensor.probe_result = Link::Connected;
        let mut m = Monitor::new(&mut sensor, Link::Disconnected, &mut led, &mut console, None::<&mut Sink>);

        run_ticks(&mut m, 10);
        assert_eq!(m.supervisor().sensor(), Link::Connected);
        assert_eq!(m.supervisor().error_count(), 0);

        // Back to normal sampling on the next tick.
        assert!(m.poll(11 * SAMPLE_INTERVAL_MS).is_some());
        drop(m);

        assert_eq!(sensor.probes, 1);
        assert_eq!(console.cycles.len(), 1);
        let heartbeat: Vec<bool> = (1..=10).map(|n| n % 2 == 1).collect();
        assert_eq!(led.levels[..10], heartbeat[..]);
        assert!(!led.levels[10]);
    }

    #[test]
    fn dropout_hands_over_to_reconnect() {
        let (mut led, mut console) = (Led::default(), Sink::default());
        let mut sensor = ScriptedSensor::new(&[]);
        let mut m = Monitor::new(&mut sensor, Link::Connected, &mut led, &mut console, None::<&mut Sink>);

        run_ticks(&mut m, DROPOUT_LIMIT);
        assert_eq!(m.supervisor().sensor(), Link::Disconnected);

        // Attempts restart from 1 at the dropout.
        for i in 1..=RECONNECT_EVERY {
            m.poll((DROPOUT_LIMIT + i) * SAMPLE_INTERVAL_MS);
        }
        drop(m);

        assert_eq!(sensor.probes, 1);
        assert!(console.cycles.is_empty());
        assert_eq!(led.levels.len(), RECONNECT_EVERY as usize);
    }

    #[test]
    fn isolated_errors_before_a_dropout_do_not_hurry_the_probe() {
        let mut feed = Vec::new();
        for _ in 0..RECONNECT_EVERY - 1 {
            feed.push(Reading::Invalid);
            feed.push(Reading::Valid(30.0));
        }
        let connected_ticks = feed.len() as u32 + DROPOUT_LIMIT;

        let (mut led, mut console) = (Led::default(), Sink::default());
        let mut sensor = ScriptedSensor::new(&feed);
        let mut m = Monitor::new(&mut sensor, Link::Connected, &mut led, &mut console, None::<&mut Sink>);

        run_ticks(&mut m, connected_ticks);
        assert_eq!(m.supervisor().sensor(), Link::Disconnected);

        m.poll((connected_ticks + 1) * SAMPLE_INTERVAL_MS);
        assert_eq!(m.supervisor().error_count(), 1);
        drop(m);

        assert_eq!(sensor.probes, 0);
        assert_eq!(console.cycles.len(), feed.len() / 2);
        assert_eq!(led.levels.last(), Some(&true));
    }
}
