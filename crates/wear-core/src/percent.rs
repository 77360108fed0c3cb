//! Wear percentages and the dual-unit input convention.
//!
//! Every curve lookup works on an integer percent in `0..=100`.  Readings
//! arrive from the host either as an integer percent or as a real number
//! which may be a percent (`0.0..=100.0`) or a fraction (`0.0..=1.0`).
//!
//! # Dual-unit rule
//!
//! Under [`PercentUnit::Auto`] a real value `v ≤ 1.0` is read as a fraction
//! and multiplied by 100; anything larger is already a percent.  This is the
//! only auto-detection performed.  Note the consequence: a reading of
//! exactly `1.0` means 100 %, not 1 %.  Hosts that report tiny percentages
//! should pass integers through [`Percent::new`] or pin the unit.

use std::fmt;
use std::str::FromStr;

use crate::WearError;

// ── PercentUnit ───────────────────────────────────────────────────────────────

/// How real-valued wear readings are interpreted.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PercentUnit {
    /// `v ≤ 1.0` is a fraction, otherwise a percent.
    #[default]
    Auto,
    /// Always a percent in `0..=100`.
    Percent,
    /// Always a fraction in `0..=1`.
    Fraction,
}

impl FromStr for PercentUnit {
    type Err = WearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto"     => Ok(PercentUnit::Auto),
            "percent"  => Ok(PercentUnit::Percent),
            "fraction" => Ok(PercentUnit::Fraction),
            other => Err(WearError::Parse(format!(
                "invalid percent unit {other:?}: expected auto, percent, or fraction"
            ))),
        }
    }
}

// ── Percent ───────────────────────────────────────────────────────────────────

/// A clamped integer percentage in `0..=100`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const FULL: Percent = Percent(100);

    /// Clamp an integer percent into range.
    #[inline]
    pub fn new(p: i64) -> Self {
        Percent(p.clamp(0, 100) as u8)
    }

    /// Interpret a real reading under the dual-unit rule (see module docs).
    #[inline]
    pub fn from_value(v: f64) -> Self {
        Self::from_reading(v, PercentUnit::Auto)
    }

    /// Interpret a real reading under an explicit unit convention.
    ///
    /// NaN reads as full health so a bad reading never penalises the holder.
    pub fn from_reading(v: f64, unit: PercentUnit) -> Self {
        if v.is_nan() {
            return Percent::FULL;
        }
        let scaled = match unit {
            PercentUnit::Auto if v <= 1.0 => v * 100.0,
            PercentUnit::Auto | PercentUnit::Percent => v,
            PercentUnit::Fraction => v * 100.0,
        };
        Percent(scaled.clamp(0.0, 100.0).round() as u8)
    }

    /// Remaining share `remaining / max`, rounded; 100 when `max == 0`.
    pub fn of_remaining(remaining: u32, max: u32) -> Self {
        if max == 0 {
            return Percent::FULL;
        }
        let rem = remaining.min(max) as f64;
        Percent((rem * 100.0 / max as f64).round() as u8)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::FULL
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
