// LuxWatch — Hardware & System Configuration
// Target: ESP32 DevKit V1 (Xtensa)

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (ESP32 DevKit V1 pinout)
// ---------------------------------------------------------------------------
pub const PIN_I2C_SDA: i32 = 21;    // I2C data line
pub const PIN_I2C_SCL: i32 = 22;    // I2C clock line
pub const PIN_STATUS_LED: i32 = 2;  // On-board blue LED (active HIGH)

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_BAUDRATE_KHZ: u32 = 100;
pub const I2C_SETTLE_MS: u64 = 100;

pub const I2C_ADDR_BH1750: u8 = 0x23;          // ADDR pin low
pub const I2C_ADDR_BH1750_ALT: u8 = 0x5C;      // ADDR pin high
pub const I2C_ADDR_OLED: u8 = 0x3C;
pub const I2C_ADDR_OLED_ALT: u8 = 0x3D;

// ---------------------------------------------------------------------------
// Display (SSD1306 OLED)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;
pub const OLED_BAR_WIDTH: u32 = 120;
pub const OLED_BAR_HEIGHT: u32 = 8;

// ---------------------------------------------------------------------------
// Console frame
// ---------------------------------------------------------------------------
pub const CONSOLE_INNER_WIDTH: usize = 44;   // columns between the borders
pub const CONSOLE_BAR_WIDTH: u32 = 40;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const SAMPLE_INTERVAL_MS: u32 = 1000;       // one cycle per second
pub const LOOP_PAUSE_MS: u32 = 10;              // yield between polls
pub const SENSOR_SETTLE_MS: u32 = 200;          // first conversion after bring-up
pub const SPLASH_DISPLAY_MS: u64 = 1000;
pub const STARTUP_DELAY_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// Signal processing & thresholds
// ---------------------------------------------------------------------------
pub const HISTORY_LEN: usize = 10;
pub const BAR_FULL_SCALE_LUX: f32 = 1000.0;
pub const LOW_LIGHT_LUX: f32 = 50.0;            // LED on below this

// ---------------------------------------------------------------------------
// Connection supervision
// ---------------------------------------------------------------------------
pub const RECONNECT_EVERY: u32 = 10;            // probe on every Nth failed attempt
pub const DROPOUT_LIMIT: u32 = 10;              // consecutive invalid reads before dropout
