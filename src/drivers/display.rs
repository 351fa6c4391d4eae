// LuxWatch — SSD1306 OLED Display
//
// 128x64 buffered-graphics wrapper around the `ssd1306` driver. The screen
// layout itself lives in `render::oled`; this module only owns the panel.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::events::SampleCycle;
use crate::render::{oled, Renderer};

type Panel<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

const LINE_HEIGHT: i32 = 10;

pub struct OledDisplay<I2C> {
    panel: Panel<I2C>,
}

impl<I2C: I2c> OledDisplay<I2C> {
    /// Initialise the panel at `address`. `None` if it does not respond.
    pub fn init(i2c: I2C, address: u8) -> Option<Self> {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        match panel.init() {
            Ok(()) => Some(Self { panel }),
            Err(e) => {
                log::debug!("SSD1306 init at 0x{:02X} failed: {:?}", address, e);
                None
            }
        }
    }

    /// Bring-up probe: `primary` first, then `fallback`. `connect` hands out a
    /// fresh bus handle for each attempt.
    pub fn probe<F>(mut connect: F, primary: u8, fallback: u8) -> Option<Self>
    where
        F: FnMut() -> I2C,
    {
        log::info!("Initializing OLED (0x{:02X})...", primary);

        if let Some(display) = Self::init(connect(), primary) {
            log::info!("  OLED initialized successfully at 0x{:02X}", primary);
            return Some(display);
        }

        log::warn!("  OLED NOT FOUND! Trying alternative address 0x{:02X}...", fallback);
        match Self::init(connect(), fallback) {
            Some(display) => {
                log::info!("  OLED found at address 0x{:02X}", fallback);
                Some(display)
            }
            None => {
                log::error!("  OLED NOT FOUND at any address!");
                None
            }
        }
    }

    /// Plain text lines from the top-left corner (boot splash).
    pub fn show_lines(&mut self, lines: &[&str]) {
        self.panel.clear_buffer();
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

        for (row, line) in lines.iter().enumerate() {
            let origin = Point::new(0, row as i32 * LINE_HEIGHT);
            if let Err(e) = Text::with_baseline(line, origin, style, Baseline::Top).draw(&mut self.panel) {
                log::error!("Display error: {:?}", e);
                return;
            }
        }

        if let Err(e) = self.panel.flush() {
            log::error!("Display error: {:?}", e);
        }
    }
}

impl<I2C: I2c> Renderer for OledDisplay<I2C> {
    fn render(&mut self, cycle: &SampleCycle) {
        let drawn = oled::draw_screen(&mut self.panel, cycle).and_then(|_| self.panel.flush());
        if let Err(e) = drawn {
            log::error!("Display error: {:?}", e);
        }
    }
}
