// LuxWatch — Actuator Controller
//
// The status LED doubles as a low-light indicator (sensor connected) and as
// the disconnect heartbeat (driven by the supervisor instead).

use crate::config::LOW_LIGHT_LUX;

/// Output level for a live reading: on below the low-light threshold.
pub fn drive(instant: f32) -> bool {
    instant < LOW_LIGHT_LUX
}
