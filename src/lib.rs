// LuxWatch — Ambient Light Monitor
//
// Hardware-independent core of the firmware: sampling schedule, smoothing,
// classification, connection supervision and the two render sinks. The
// ESP32 binding lives in `main.rs` and `drivers::led`.

pub mod actuator;
pub mod classifier;
pub mod config;
pub mod drivers;
pub mod events;
pub mod filter;
pub mod render;
pub mod scheduler;
pub mod supervisor;
pub mod tasks;
