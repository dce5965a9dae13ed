//! Simulation progress and timing configuration.
//!
//! # Design
//!
//! Progress along a route is a fraction in `[0, 1]`, but it is stored as a
//! fixed-point integer with `Progress::SCALE` units per whole route.  Each
//! tick adds a whole number of units, so the sum after *n* ticks is exact
//! and completion is detected without floating-point drift:
//!
//!   step_units = round(base_step · speed · SCALE)
//!
//! At the default `base_step = 0.005` and speed 2, one tick is 10⁷ units
//! and 100 ticks land on exactly 1.0.

use std::fmt;
use std::time::Duration;

use crate::{FleetError, FleetResult, SpeedMultiplier};

// ── Progress ─────────────────────────────────────────────────────────────────

/// Fraction of a route traversed, as fixed-point units of `1 / SCALE`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progress(u64);

impl Progress {
    /// Units per whole route.
    pub const SCALE: u64 = 1_000_000_000;

    pub const ZERO: Progress = Progress(0);
    pub const COMPLETE: Progress = Progress(Self::SCALE);

    /// Nearest representable progress to `fraction`, clamped to `[0, 1]`.
    /// NaN maps to zero.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::ZERO;
        }
        let clamped = fraction.clamp(0.0, 1.0);
        Self((clamped * Self::SCALE as f64).round() as u64)
    }

    /// Raw units.
    #[inline]
    pub fn units(self) -> u64 {
        self.0
    }

    /// Progress as a float in `[0, 1]`.
    #[inline]
    pub fn fraction(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Add `units`, clamping at [`Progress::COMPLETE`].
    #[inline]
    pub fn advance(self, units: u64) -> Progress {
        Progress(self.0.saturating_add(units).min(Self::SCALE))
    }

    #[inline]
    pub fn is_complete(self) -> bool {
        self.0 >= Self::SCALE
    }

    /// Whole percent, rounded to nearest (the progress bar label).
    #[inline]
    pub fn percent(self) -> u8 {
        ((self.0 * 100 + Self::SCALE / 2) / Self::SCALE) as u8
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Timing configuration for the route simulation.
///
/// Typically built with `Default` and tweaked by the application crate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Wall-clock interval between ticks, in milliseconds.  Default: 100.
    pub tick_interval_ms: u64,

    /// Fraction of the route added per tick at speed 1.  Default: 0.005
    /// (a full traversal is 200 ticks, i.e. 20 s at the default interval).
    pub base_step: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            base_step:        0.005,
        }
    }
}

impl SimConfig {
    /// Smallest accepted `base_step`: one progress unit per tick at
    /// [`SpeedMultiplier::MIN`].
    pub const MIN_BASE_STEP: f64 = 1e-6;

    /// Reject configurations that would never advance or would jump past
    /// the whole route in a single tick.
    pub fn validate(&self) -> FleetResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(FleetError::Config("tick_interval_ms must be > 0".into()));
        }
        if !(self.base_step.is_finite()
            && self.base_step >= Self::MIN_BASE_STEP
            && self.base_step <= 1.0)
        {
            return Err(FleetError::Config(format!(
                "base_step must be in [1e-6, 1], got {}",
                self.base_step
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Fixed-point progress added by one tick at `speed`, capped at a whole
    /// route.  For a validated config this is at least one unit, so a running
    /// simulation always reaches completion; the floor of one only engages
    /// for configs that skipped [`validate`][Self::validate].
    pub fn step_units(&self, speed: SpeedMultiplier) -> u64 {
        let units = (self.base_step * speed.get() * Progress::SCALE as f64).round();
        if units >= Progress::SCALE as f64 {
            Progress::SCALE
        } else {
            (units as u64).max(1)
        }
    }

    /// Ticks needed for a full traversal at `speed`.
    pub fn ticks_to_complete(&self, speed: SpeedMultiplier) -> u64 {
        Progress::SCALE.div_ceil(self.step_units(speed))
    }
}
