// LuxWatch — Firmware Entry Point
//
// Boot sequence:
//   1. Bring up logging and the I2C bus (SDA=GPIO21, SCL=GPIO22, 100 kHz).
//   2. Scan the bus and report what answers.
//   3. Probe the SSD1306 OLED (0x3C, then 0x3D) and show a splash screen.
//   4. Probe the BH1750 light sensor (0x23, then 0x5C).
//   5. Print the system status and enter the monitor loop.
//
// The monitor loop never returns: one reading per second, forever, with the
// LED blinking a heartbeat while the sensor is missing.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    firmware::main()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("luxwatch is ESP32 firmware: build it for an espidf target.");
}

#[cfg(target_os = "espidf")]
mod firmware {
    use std::cell::RefCell;
    use std::thread;
    use std::time::Duration;

    use embedded_hal_bus::i2c::RefCellDevice;
    use esp_idf_hal::delay::FreeRtos;
    use esp_idf_hal::gpio::{OutputPin, PinDriver};
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;

    use luxwatch::config::*;
    use luxwatch::drivers::bh1750::Bh1750;
    use luxwatch::drivers::display::OledDisplay;
    use luxwatch::drivers::led::StatusLed;
    use luxwatch::drivers::{scan, Indicator, LightSensor};
    use luxwatch::render::console::ConsoleRenderer;
    use luxwatch::scheduler::Clock;
    use luxwatch::supervisor::Link;
    use luxwatch::tasks::monitor::Monitor;

    type SharedBus = &'static RefCell<I2cDriver<'static>>;

    // -----------------------------------------------------------------------
    // Clock: ESP high-resolution timer, FreeRTOS delay as the yield point
    // -----------------------------------------------------------------------
    struct EspClock;

    impl Clock for EspClock {
        fn now_ms(&self) -> u32 {
            // Wraps at ~49 days; the scheduler compares with wrapping_sub.
            unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as u32 }
        }

        fn pause(&mut self, ms: u32) {
            FreeRtos::delay_ms(ms);
        }
    }

    pub fn main() -> anyhow::Result<()> {
        // Link esp-idf-sys runtime patches and initialise logging.
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();
        thread::sleep(Duration::from_millis(STARTUP_DELAY_MS));

        log::info!("==================================");
        log::info!("   LUXWATCH AMBIENT LIGHT MONITOR");
        log::info!("==================================");
        log::info!("Initializing system...");

        let peripherals = Peripherals::take()?;

        // ---- Status LED (off until the first cycle) -------------------------
        let led_pin = PinDriver::output(peripherals.pins.gpio2.downgrade_output())?;
        let mut led = StatusLed::new(led_pin);
        led.set(false);
        log::info!("Status LED on GPIO{}", PIN_STATUS_LED);

        // ---- I2C bus (shared between OLED and BH1750) -----------------------
        log::info!("Initializing I2C (SDA={}, SCL={})...", PIN_I2C_SDA, PIN_I2C_SCL);
        let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
        let i2c = I2cDriver::new(
            peripherals.i2c0,
            peripherals.pins.gpio21, // SDA
            peripherals.pins.gpio22, // SCL
            &i2c_config,
        )?;
        thread::sleep(Duration::from_millis(I2C_SETTLE_MS));
        log::info!("I2C initialized successfully!");

        // The bus lives for the whole programme; only the monitor loop touches
        // it, so a RefCell is enough to share it between the two devices.
        let bus: SharedBus = Box::leak(Box::new(RefCell::new(i2c)));

        scan::scan(&mut RefCellDevice::new(bus));

        // ---- Devices --------------------------------------------------------
        let mut display =
            OledDisplay::probe(|| RefCellDevice::new(bus), I2C_ADDR_OLED, I2C_ADDR_OLED_ALT);
        if let Some(oled) = display.as_mut() {
            oled.show_lines(&["LuxWatch", "BH1750 Light Sensor", "Initializing..."]);
            thread::sleep(Duration::from_millis(SPLASH_DISPLAY_MS));
        }

        let mut sensor = Bh1750::new(RefCellDevice::new(bus), FreeRtos);
        let sensor_link = sensor.probe(I2C_ADDR_BH1750, I2C_ADDR_BH1750_ALT);

        report_status(display.is_some(), sensor_link);

        // ---- Monitor loop (never returns) -----------------------------------
        let console = ConsoleRenderer::new(std::io::stdout());
        let mut monitor = Monitor::new(sensor, sensor_link, led, console, display);
        monitor.run(&mut EspClock)
    }

    fn report_status(oled_ok: bool, sensor_link: Link) {
        let oled_link = if oled_ok { Link::Connected } else { Link::Disconnected };

        log::info!("=== SYSTEM STATUS ===");
        log::info!("OLED: {}", oled_link.status());
        log::info!("BH1750: {}", sensor_link.status());

        if !sensor_link.is_connected() {
            log::warn!("WARNING: BH1750 not found!");
            log::warn!("Please check:");
            log::warn!("1. I2C connections (SDA=GPIO{}, SCL=GPIO{})", PIN_I2C_SDA, PIN_I2C_SCL);
            log::warn!("2. Power (3.3V and GND)");
            log::warn!(
                "3. I2C address (try 0x{:02X} or 0x{:02X})",
                I2C_ADDR_BH1750,
                I2C_ADDR_BH1750_ALT
            );
        }

        log::info!("System Ready!");
    }
}
