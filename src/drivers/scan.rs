// LuxWatch — I2C Bus Discovery
//
// Addresses every 7-bit slave with an empty write and reports who ACKs.
// Informational only; bring-up never depends on the result.

use embedded_hal::i2c::{Error, ErrorKind, I2c};

const FIRST_ADDRESS: u8 = 0x01;
const LAST_ADDRESS: u8 = 0x7E;

/// Name of the part usually found at `address`, if it is one we know.
pub fn known_device(address: u8) -> Option<&'static str> {
    match address {
        0x23 | 0x5C => Some("BH1750 Light Sensor"),
        0x3C | 0x3D => Some("OLED SSD1306"),
        0x68 => Some("MPU6050/DS3231"),
        0x76 | 0x77 => Some("BMP280/BME280"),
        _ => None,
    }
}

/// Probe the whole bus and return the responding addresses in order.
pub fn scan<I2C: I2c>(i2c: &mut I2C) -> Vec<u8> {
    log::info!("Scanning I2C bus...");
    log::info!("Address  | Status");
    log::info!("------------------");

    let mut found = Vec::new();
    for address in FIRST_ADDRESS..=LAST_ADDRESS {
        match i2c.write(address, &[]) {
            Ok(()) => {
                log::info!(
                    "  0x{:02X}  | {}",
                    address,
                    known_device(address).unwrap_or("Unknown I2C Device")
                );
                found.push(address);
            }
            Err(e) => match e.kind() {
                ErrorKind::NoAcknowledge(_) => {}
                kind => log::warn!("  0x{:02X}  | Unknown error at address ({:?})", address, kind),
            },
        }
    }

    if found.is_empty() {
        log::warn!("  No I2C devices found!");
    } else {
        log::info!("Total devices found: {}", found.len());
    }
    found
}
