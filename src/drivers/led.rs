// LuxWatch — Status LED Driver
//
// On-board GPIO LED: low-light indicator, or disconnect heartbeat.

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

use crate::drivers::Indicator;

pub struct StatusLed<'d> {
    pin: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> StatusLed<'d> {
    pub fn new(pin: PinDriver<'d, AnyOutputPin, Output>) -> Self {
        Self { pin }
    }
}

impl Indicator for StatusLed<'_> {
    fn set(&mut self, on: bool) {
        let result = if on { self.pin.set_high() } else { self.pin.set_low() };
        if let Err(e) = result {
            log::warn!("Status LED write failed: {}", e);
        }
    }
}
