// LuxWatch — Readings, Bands & Sample Cycles

// ---------------------------------------------------------------------------
// Sensor Reading (lux, or nothing usable)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// A measured illuminance in lux (finite, non-negative).
    Valid(f32),
    /// The sensor produced nothing usable this cycle.
    Invalid,
}

impl Reading {
    /// Classify a raw driver value. Non-finite and negative values are invalid.
    pub fn from_raw(lux: f32) -> Self {
        if lux.is_finite() && lux >= 0.0 {
            Self::Valid(lux)
        } else {
            Self::Invalid
        }
    }

    pub fn lux(&self) -> Option<f32> {
        match self {
            Self::Valid(lux) => Some(*lux),
            Self::Invalid => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Light Bands
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LightBand {
    PitchBlack,
    VeryDark,
    Dark,
    Dim,
    Normal,
    Bright,
    VeryBright,
    DirectSun,
    ExtremeLight,
}

impl LightBand {
    /// Human-readable label shown on the console and the OLED.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PitchBlack   => "Pitch Black",
            Self::VeryDark     => "Very Dark",
            Self::Dark         => "Dark",
            Self::Dim          => "Dim",
            Self::Normal       => "Normal",
            Self::Bright       => "Bright",
            Self::VeryBright   => "Very Bright",
            Self::DirectSun    => "Direct Sun",
            Self::ExtremeLight => "Extreme Light",
        }
    }
}

impl core::fmt::Display for LightBand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Sample Cycle — produced once per tick, borrowed by every sink
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleCycle {
    pub instant: f32,
    pub smoothed: f32,
    pub band: LightBand,
    pub elapsed_s: u32,
}
