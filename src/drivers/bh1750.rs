// LuxWatch — BH1750 Ambient Light Sensor Driver
//
// Register-less command protocol over any embedded-hal I2C bus. The sensor
// runs in continuous high-resolution mode (1 lx resolution, 120 ms conversion).

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::SENSOR_SETTLE_MS;
use crate::drivers::LightSensor;
use crate::events::Reading;
use crate::supervisor::Link;

// BH1750 opcodes
const CMD_POWER_ON: u8 = 0x01;
const CMD_CONTINUOUS_HIGH_RES: u8 = 0x10;

/// Counts per lux at the default measurement time (datasheet typical).
const COUNTS_PER_LUX: f32 = 1.2;

pub struct Bh1750<I2C, D> {
    i2c: I2C,
    delay: D,
    address: Option<u8>,
}

impl<I2C, D> Bh1750<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: None,
        }
    }

    /// Address the sensor answered on at the last successful bring-up.
    pub fn address(&self) -> Option<u8> {
        self.address
    }

    /// Power the sensor up at `address` and start continuous conversions.
    pub fn begin(&mut self, address: u8) -> Result<(), I2C::Error> {
        self.i2c.write(address, &[CMD_POWER_ON])?;
        self.i2c.write(address, &[CMD_CONTINUOUS_HIGH_RES])?;
        self.address = Some(address);
        Ok(())
    }

    /// Read the latest conversion in lux.
    pub fn read_lux(&mut self, address: u8) -> Result<f32, I2C::Error> {
        let mut raw = [0u8; 2];
        self.i2c.read(address, &mut raw)?;
        Ok(u16::from_be_bytes(raw) as f32 / COUNTS_PER_LUX)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, D> LightSensor for Bh1750<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn probe(&mut self, primary: u8, fallback: u8) -> Link {
        log::info!("Initializing BH1750...");
        self.address = None;

        if self.begin(primary).is_ok() {
            log::info!("  BH1750 initialized successfully at 0x{:02X}", primary);
        } else {
            log::warn!("  Trying address 0x{:02X}...", fallback);
            if self.begin(fallback).is_err() {
                log::error!("  BH1750 NOT FOUND at any address!");
                return Link::Disconnected;
            }
            log::info!("  BH1750 found at address 0x{:02X}", fallback);
        }

        // First conversion needs up to 180 ms; give it a margin.
        self.delay.delay_ms(SENSOR_SETTLE_MS);
        log::info!("  Mode: Continuous High Resolution");
        Link::Connected
    }

    fn read(&mut self) -> Reading {
        let Some(address) = self.address else {
            return Reading::Invalid;
        };

        match self.read_lux(address) {
            Ok(lux) => Reading::from_raw(lux),
            Err(e) => {
                log::debug!("BH1750 read error: {:?}", e);
                Reading::Invalid
            }
        }
    }
}
