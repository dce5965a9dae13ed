//! Simulation speed multiplier.

use std::fmt;

use crate::{FleetError, FleetResult};

/// Scales how much progress a single tick adds.  Always finite and `> 0`.
///
/// The control surface offers the four presets below, but any finite value
/// from [`MIN`][Self::MIN] upwards is accepted.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct SpeedMultiplier(f64);

impl SpeedMultiplier {
    pub const SLOW:      SpeedMultiplier = SpeedMultiplier(0.5);
    pub const NORMAL:    SpeedMultiplier = SpeedMultiplier(1.0);
    pub const FAST:      SpeedMultiplier = SpeedMultiplier(2.0);
    pub const VERY_FAST: SpeedMultiplier = SpeedMultiplier(4.0);

    /// Presets in ascending order, as offered by the speed selector.
    pub const PRESETS: [SpeedMultiplier; 4] =
        [Self::SLOW, Self::NORMAL, Self::FAST, Self::VERY_FAST];

    /// Slowest accepted multiplier.  Paired with
    /// [`SimConfig::MIN_BASE_STEP`][crate::SimConfig::MIN_BASE_STEP] it still
    /// yields at least one progress unit per tick, so the per-tick step is
    /// always proportional to the speed.
    pub const MIN: f64 = 0.001;

    /// Validate `value` as a multiplier.
    pub fn new(value: f64) -> FleetResult<Self> {
        if value.is_finite() && value >= Self::MIN {
            Ok(Self(value))
        } else {
            Err(FleetError::InvalidSpeed(value))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Human label used by the speed selector.
    pub fn label(self) -> &'static str {
        match self.0 {
            v if v < 1.0 => "slow",
            v if v == 1.0 => "normal",
            v if v <= 2.0 => "fast",
            _ => "very fast",
        }
    }
}

impl Default for SpeedMultiplier {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl TryFrom<f64> for SpeedMultiplier {
    type Error = FleetError;

    fn try_from(value: f64) -> FleetResult<Self> {
        Self::new(value)
    }
}

impl From<SpeedMultiplier> for f64 {
    fn from(s: SpeedMultiplier) -> f64 {
        s.0
    }
}

impl fmt::Display for SpeedMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}
