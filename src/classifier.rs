// LuxWatch — Light-Band Classifier
//
// Maps a lux value onto the nine named bands. Bands are half-open with an
// inclusive lower bound; the table is scanned darkest first.

use crate::events::LightBand;

/// Upper (exclusive) bound of every band except the last.
const BAND_CEILINGS: [(f32, LightBand); 8] = [
    (1.0, LightBand::PitchBlack),
    (10.0, LightBand::VeryDark),
    (50.0, LightBand::Dark),
    (200.0, LightBand::Dim),
    (500.0, LightBand::Normal),
    (1000.0, LightBand::Bright),
    (5000.0, LightBand::VeryBright),
    (10_000.0, LightBand::DirectSun),
];

/// Classify a non-negative, finite lux value.
pub fn classify(lux: f32) -> LightBand {
    BAND_CEILINGS
        .iter()
        .find(|(ceiling, _)| lux < *ceiling)
        .map(|(_, band)| *band)
        .unwrap_or(LightBand::ExtremeLight)
}
