// LuxWatch — Device Drivers
//
// The sensor and the indicator are reached through small traits so the
// monitor loop can run against the real peripherals or test doubles.

pub mod bh1750;
pub mod display;
#[cfg(target_os = "espidf")]
pub mod led;
pub mod scan;

use crate::events::Reading;
use crate::supervisor::Link;

/// An ambient-light sensor that can be (re-)brought up at one of two addresses.
pub trait LightSensor {
    /// Bring-up probe: try `primary`, then `fallback`.
    fn probe(&mut self, primary: u8, fallback: u8) -> Link;

    /// One measurement. Bus failures come back as [`Reading::Invalid`].
    fn read(&mut self) -> Reading;
}

/// A binary output (the status LED).
pub trait Indicator {
    fn set(&mut self, on: bool);
}

impl<S: LightSensor + ?Sized> LightSensor for &mut S {
    fn probe(&mut self, primary: u8, fallback: u8) -> Link {
        (**self).probe(primary, fallback)
    }

    fn read(&mut self) -> Reading {
        (**self).read()
    }
}

impl<I: Indicator + ?Sized> Indicator for &mut I {
    fn set(&mut self, on: bool) {
        (**self).set(on)
    }
}
