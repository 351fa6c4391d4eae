// LuxWatch — Render Sinks
//
// Both sinks take the same sample cycle and differ only in output medium.

pub mod console;
pub mod oled;

use crate::config::BAR_FULL_SCALE_LUX;
use crate::events::SampleCycle;

/// A side-effect-only consumer of one sample cycle. Rendering never fails;
/// sinks swallow their own output errors.
pub trait Renderer {
    fn render(&mut self, cycle: &SampleCycle);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, cycle: &SampleCycle) {
        (**self).render(cycle)
    }
}

/// Filled length of a `full`-unit bar for `lux`, clamped to the bar's range.
pub fn bar_fill(lux: f32, full: u32) -> u32 {
    let fraction = lux.clamp(0.0, BAR_FULL_SCALE_LUX) / BAR_FULL_SCALE_LUX;
    (fraction * full as f32).round() as u32
}
