// LuxWatch — OLED Screen Layout
//
// Fixed 128x64 layout drawn onto any binary-colour draw target:
//
//   y  0  title
//   y 10  divider
//   y 15  "Lux:" label
//   y 25  instant value (large font) + unit
//   y 45  120x8 bar, filled proportionally
//   y 55  band label

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X9};
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::config::*;
use crate::events::SampleCycle;
use crate::render::bar_fill;

pub const TITLE: &str = "Light Sensor BH1750";

const DIVIDER_Y: i32 = 10;
const LABEL_Y: i32 = 15;
const VALUE_Y: i32 = 25;
const BAR_Y: i32 = 45;
const BAND_Y: i32 = 55;

fn small() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X9)
        .text_color(BinaryColor::On)
        .build()
}

fn large() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_10X20, BinaryColor::On)
}

/// Clear `target` and draw the full screen for one cycle.
pub fn draw_screen<D>(target: &mut D, cycle: &SampleCycle) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    Text::with_baseline(TITLE, Point::zero(), small(), Baseline::Top).draw(target)?;
    Line::new(Point::new(0, DIVIDER_Y), Point::new(SCREEN_WIDTH as i32 - 1, DIVIDER_Y))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(target)?;

    Text::with_baseline("Lux: ", Point::new(0, LABEL_Y), small(), Baseline::Top).draw(target)?;

    let value = format!("{:.0}", cycle.instant);
    let next = Text::with_baseline(&value, Point::new(0, VALUE_Y), large(), Baseline::Top)
        .draw(target)?;
    Text::with_baseline(" lx", next, small(), Baseline::Top).draw(target)?;

    draw_bar(target, cycle.instant)?;

    Text::with_baseline(cycle.band.label(), Point::new(0, BAND_Y), small(), Baseline::Top)
        .draw(target)?;

    Ok(())
}

fn draw_bar<D>(target: &mut D, lux: f32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let filled = bar_fill(lux, OLED_BAR_WIDTH);
    if filled > 0 {
        Rectangle::new(Point::new(0, BAR_Y), Size::new(filled, OLED_BAR_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)?;
    }
    Rectangle::new(Point::new(0, BAR_Y), Size::new(OLED_BAR_WIDTH, OLED_BAR_HEIGHT))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(target)
}
