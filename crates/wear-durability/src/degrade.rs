//! `DegradationCurves`: what a worn item loses.
//!
//! | Concern      | Curve kind          | Result                                |
//! |--------------|---------------------|---------------------------------------|
//! | weapon       | `FactorCurve` index | outgoing damage multiplier            |
//! | armour       | `FactorCurve` index | incoming damage multiplier (averaged) |
//! | mining delay | `FactorCurve` index | action duration scale                 |
//! | fatigue      | `LevelCurve` index  | [`FatigueEffect`] in effect mode      |
//!
//! Every factor is 1.0 (and fatigue is `None`) when its toggle is off.

use wear_core::{Category, ItemState, Percent};
use wear_curve::CategoryCurveIndex;

// ── Toggles & modes ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DegradationToggles {
    pub enabled: bool,
    pub weapon:  bool,
    pub armor:   bool,
    pub mining:  bool,
}

impl Default for DegradationToggles {
    fn default() -> Self {
        Self { enabled: true, weapon: true, armor: true, mining: true }
    }
}

impl DegradationToggles {
    fn weapon_on(&self) -> bool {
        self.enabled && self.weapon
    }

    fn armor_on(&self) -> bool {
        self.enabled && self.armor
    }

    fn mining_on(&self) -> bool {
        self.enabled && self.mining
    }
}

/// How worn tools slow harvesting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MiningMode {
    /// Scale the tracked action duration.
    #[default]
    Delay,
    /// Leave timing to the host and apply a fatigue effect instead.
    Effect,
}

/// Shape of the fatigue effect in [`MiningMode::Effect`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FatigueStyle {
    /// A short fixed pulse at the curve level.
    Burst { duration_ticks: u32 },
    /// Duration grows linearly as health drops; level clamped.
    Smooth {
        min_level:          u32,
        max_level:          u32,
        /// Duration at 100 % health.
        min_duration_ticks: u32,
        /// Duration at 0 % health.
        max_duration_ticks: u32,
    },
}

impl Default for FatigueStyle {
    fn default() -> Self {
        FatigueStyle::Burst { duration_ticks: 40 }
    }
}

/// Minimum length of a burst pulse.
const MIN_BURST_TICKS: u32 = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FatigueEffect {
    /// 1-based level from the curve.
    pub level:          u32,
    /// `level - 1`, the host's zero-based effect strength.
    pub amplifier:      u32,
    pub duration_ticks: u32,
}

// ── DegradationCurves ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct DegradationCurves {
    pub toggles:  DegradationToggles,
    pub mode:     MiningMode,
    pub style:    FatigueStyle,
    weapon:       CategoryCurveIndex<f64>,
    armor:        CategoryCurveIndex<f64>,
    mining_delay: CategoryCurveIndex<f64>,
    fatigue:      CategoryCurveIndex<u32>,
}

impl Default for DegradationCurves {
    /// Identity curves everywhere; fatigue level 0.
    fn default() -> Self {
        Self {
            toggles:      DegradationToggles::default(),
            mode:         MiningMode::default(),
            style:        FatigueStyle::default(),
            weapon:       CategoryCurveIndex::constant(1.0),
            armor:        CategoryCurveIndex::constant(1.0),
            mining_delay: CategoryCurveIndex::constant(1.0),
            fatigue:      CategoryCurveIndex::constant(0),
        }
    }
}

impl DegradationCurves {
    pub fn with_weapon(mut self, index: CategoryCurveIndex<f64>) -> Self {
        self.weapon = index;
        self
    }

    pub fn with_armor(mut self, index: CategoryCurveIndex<f64>) -> Self {
        self.armor = index;
        self
    }

    pub fn with_mining_delay(mut self, index: CategoryCurveIndex<f64>) -> Self {
        self.mining_delay = index;
        self
    }

    pub fn with_fatigue(mut self, index: CategoryCurveIndex<u32>) -> Self {
        self.fatigue = index;
        self
    }

    /// Outgoing damage multiplier for a weapon.
    pub fn weapon_factor(&self, weapon: &ItemState) -> f64 {
        if !self.toggles.weapon_on() || !weapon.supports_wear() {
            return 1.0;
        }
        self.weapon.lookup(&weapon.category, weapon.remaining_percent())
    }

    /// Incoming damage multiplier: mean of the per-piece factors over pieces
    /// that wear, 1.0 when there are none.
    pub fn armor_factor(&self, pieces: &[ItemState]) -> f64 {
        if !self.toggles.armor_on() {
            return 1.0;
        }
        let (sum, n) = pieces
            .iter()
            .filter(|p| p.supports_wear())
            .map(|p| self.armor.lookup(&p.category, p.remaining_percent()))
            .fold((0.0, 0u32), |(s, n), f| (s + f, n + 1));
        if n == 0 { 1.0 } else { sum / n as f64 }
    }

    /// Raw duration scale for harvesting with `tool` at `wear`.
    ///
    /// 1.0 when mining degradation is off or the mode is not `Delay`.
    /// Callers clamp the result to at least 1.0.
    pub fn mining_delay_factor(&self, tool: &Category, wear: Percent) -> f64 {
        if !self.toggles.mining_on() || self.mode != MiningMode::Delay {
            return 1.0;
        }
        self.mining_delay.lookup(tool, wear)
    }

    /// `true` when the action tracker should time harvesting.
    pub fn delays_actions(&self) -> bool {
        self.mode == MiningMode::Delay
    }

    /// Fatigue to apply for harvesting with `tool` at `wear`, effect mode only.
    pub fn fatigue(&self, tool: &Category, wear: Percent) -> Option<FatigueEffect> {
        if !self.toggles.mining_on() || self.mode != MiningMode::Effect {
            return None;
        }
        let level = self.fatigue.lookup(tool, wear);
        if level == 0 {
            return None;
        }

        let (level, duration_ticks) = match self.style {
            FatigueStyle::Burst { duration_ticks } => (level, duration_ticks.max(MIN_BURST_TICKS)),
            FatigueStyle::Smooth { min_level, max_level, min_duration_ticks, max_duration_ticks } => {
                let lost = 100 - wear.get() as u64;
                let span = max_duration_ticks.saturating_sub(min_duration_ticks) as u64;
                let level = level.clamp(min_level, max_level.max(min_level));
                let extra = u32::try_from(lost * span / 100).unwrap_or(u32::MAX);
                (level, min_duration_ticks.saturating_add(extra))
            }
        };
        Some(FatigueEffect { level, amplifier: level.saturating_sub(1), duration_ticks })
    }
}
