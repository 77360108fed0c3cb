//! `WearConfig`: the YAML configuration surface.
//!
//! Every field has a default, so an empty document is a valid configuration
//! in which all multipliers and curves are the identity:
//!
//! ```yaml
//! seed: 7
//! global_multiplier: 1.0
//! per_item_multipliers:
//!   "DIAMOND_*": 0.5
//!   ELYTRA: 2.0
//! bonus_tiers:
//!   - { tag: durability.bonus.gold,   factor: 0.5 }
//!   - { tag: durability.bonus.silver, factor: 0.75 }
//! mining:
//!   mode: delay
//!   duration_curve: { "100": 1.0, "50": 1.25, "10": 2.0 }
//!   per_item_duration_curves:
//!     "WOODEN_*": { "100": 1.1, "25": 2.5 }
//! scheduler:
//!   interval_ticks: 2
//!   timeout_seconds: 8
//! salvage:
//!   drop_count_min: 1
//!   drop_count_max: 2
//!   matchers:
//!     - when: { category: DIAMOND_SWORD, lore_contains: soulbound }
//!       drops: [NETHERITE_SCRAP]
//!   per_item: { IRON_PICKAXE: [IRON_INGOT, STICK] }
//!   per_tier: { IRON: [IRON_NUGGET] }
//! ```
//!
//! Structural problems (unreadable file, bad YAML, a zero scheduler
//! interval) are errors.  Content problems inside curves (non-integer or
//! out-of-range thresholds) are skipped and logged by the curve loader.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use wear_action::{DurationEstimator, load_heuristic_csv};
use wear_core::{Percent, PercentUnit, SchedulerClock};
use wear_curve::{parse_index, parse_matcher};
use wear_durability::{
    BonusTier, DegradationCurves, DegradationToggles, FatigueStyle, LowAlertPolicy, MendingPolicy,
    MiningMode, MultiplierResolver, SalvagePolicy, SalvageRule, WearPolicy, WeatherWear,
};

use crate::{EngineError, EngineResult};

type CurveTable<V> = BTreeMap<String, V>;
type PerItemCurves<V> = BTreeMap<String, CurveTable<V>>;

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusTierConfig {
    pub tag:    String,
    pub factor: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    pub enabled:    bool,
    pub multiplier: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self { enabled: false, multiplier: 2.0 }
    }
}

impl PenaltyConfig {
    fn factor(&self) -> Option<f64> {
        self.enabled.then_some(self.multiplier)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrongToolConfig {
    pub blocks: PenaltyConfig,
    pub combat: PenaltyConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoProtectConfig {
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowAlertConfig {
    pub enabled:           bool,
    pub threshold_percent: u8,
    pub cooldown_seconds:  u64,
}

impl Default for LowAlertConfig {
    fn default() -> Self {
        Self { enabled: true, threshold_percent: 5, cooldown_seconds: 10 }
    }
}

/// A toggle plus a global curve and per-category curves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSection {
    pub enabled:  bool,
    pub curve:    CurveTable<f64>,
    pub per_item: PerItemCurves<f64>,
}

impl Default for CurveSection {
    fn default() -> Self {
        Self { enabled: true, curve: CurveTable::new(), per_item: PerItemCurves::new() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegradationConfig {
    pub enabled: bool,
    pub weapon:  CurveSection,
    pub armor:   CurveSection,
}

impl Default for DegradationConfig {
    fn default() -> Self {
        Self { enabled: true, weapon: CurveSection::default(), armor: CurveSection::default() }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MiningModeSetting {
    #[default]
    Delay,
    Effect,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatigueStyleSetting {
    #[default]
    Burst,
    Smooth,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothConfig {
    pub min_level:          u32,
    pub max_level:          u32,
    pub min_duration_ticks: u32,
    pub max_duration_ticks: u32,
}

impl Default for SmoothConfig {
    fn default() -> Self {
        Self { min_level: 1, max_level: 2, min_duration_ticks: 40, max_duration_ticks: 200 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    pub enabled:                  bool,
    pub mode:                     MiningModeSetting,
    pub duration_curve:           CurveTable<f64>,
    pub per_item_duration_curves: PerItemCurves<f64>,
    pub fatigue_curve:            CurveTable<u32>,
    pub per_item_fatigue_curves:  PerItemCurves<u32>,
    pub style:                    FatigueStyleSetting,
    pub burst_duration_ticks:     u32,
    pub smooth:                   SmoothConfig,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            enabled:                  true,
            mode:                     MiningModeSetting::default(),
            duration_curve:           CurveTable::new(),
            per_item_duration_curves: PerItemCurves::new(),
            fatigue_curve:            CurveTable::new(),
            per_item_fatigue_curves:  PerItemCurves::new(),
            style:                    FatigueStyleSetting::default(),
            burst_duration_ticks:     40,
            smooth:                   SmoothConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub interval_ticks:  u64,
    /// Idle limit for a tracked action; 0 disables the timeout.
    pub timeout_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { interval_ticks: 2, timeout_seconds: 8 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MendingConfig {
    pub factor:         f64,
    pub non_repairable: Vec<String>,
}

impl Default for MendingConfig {
    fn default() -> Self {
        Self { factor: 1.0, non_repairable: Vec::new() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub enabled:        bool,
    pub period_seconds: u64,
    pub affect_tools:   bool,
    pub affect_armor:   bool,
    pub tool_prefixes:  Vec<String>,
    pub armor_prefixes: Vec<String>,
    pub exempt_tiers:   Vec<String>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled:        true,
            period_seconds: 5,
            affect_tools:   true,
            affect_armor:   true,
            tool_prefixes:  Vec::new(),
            armor_prefixes: Vec::new(),
            exempt_tiers:   Vec::new(),
        }
    }
}

/// Conditions of one salvage matcher; unset or blank fields always hold.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalvageWhen {
    pub category:      Option<String>,
    pub model_data:    Option<i64>,
    pub name_contains: Option<String>,
    pub lore_contains: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalvageMatcherConfig {
    #[serde(default)]
    pub when:  SalvageWhen,
    pub drops: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalvageConfig {
    pub enabled:              bool,
    pub also_on_auto_protect: bool,
    pub drop_count_min:       u32,
    pub drop_count_max:       u32,
    /// Tried in order before the per-item and per-tier pools.
    pub matchers:             Vec<SalvageMatcherConfig>,
    pub per_item:             BTreeMap<String, Vec<String>>,
    /// Keyed by the category name up to its first `_`.
    pub per_tier:             BTreeMap<String, Vec<String>>,
}

impl Default for SalvageConfig {
    fn default() -> Self {
        Self {
            enabled:              true,
            also_on_auto_protect: false,
            drop_count_min:       1,
            drop_count_max:       2,
            matchers:             Vec::new(),
            per_item:             BTreeMap::new(),
            per_tier:             BTreeMap::new(),
        }
    }
}

// ── WearConfig ────────────────────────────────────────────────────────────────

/// Complete engine configuration.  See the module docs for the YAML shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WearConfig {
    /// Seed for the wear RNG.  The same seed replays the same wear rolls.
    pub seed:                 u64,
    pub percent_unit:         PercentUnit,
    pub global_multiplier:    f64,
    /// Category (or `PREFIX_*`) → multiplier, replacing the global one.
    pub per_item_multipliers: BTreeMap<String, f64>,
    /// Categories with their own base instead of `global_multiplier`.
    pub special_defaults:     BTreeMap<String, f64>,
    /// Zone / world name → multiplier.
    pub context_multipliers:  BTreeMap<String, f64>,
    /// Evaluated in order; first tier the actor holds wins.
    pub bonus_tiers:          Vec<BonusTierConfig>,
    pub include_armor:        bool,
    pub axe_is_weapon:        bool,
    pub wrong_tool:           WrongToolConfig,
    pub auto_protect:         AutoProtectConfig,
    pub low_alert:            LowAlertConfig,
    pub degradation:          DegradationConfig,
    pub mining:               MiningConfig,
    /// Optional CSV replacing the built-in heuristic durations.
    pub heuristic_table:      Option<PathBuf>,
    pub scheduler:            SchedulerConfig,
    pub mending:              MendingConfig,
    pub weather:              WeatherConfig,
    pub salvage:              SalvageConfig,
}

impl Default for WearConfig {
    fn default() -> Self {
        Self {
            seed:                 0,
            percent_unit:         PercentUnit::default(),
            global_multiplier:    1.0,
            per_item_multipliers: BTreeMap::new(),
            special_defaults:     BTreeMap::new(),
            context_multipliers:  BTreeMap::new(),
            bonus_tiers:          Vec::new(),
            include_armor:        true,
            axe_is_weapon:        true,
            wrong_tool:           WrongToolConfig::default(),
            auto_protect:         AutoProtectConfig::default(),
            low_alert:            LowAlertConfig::default(),
            degradation:          DegradationConfig::default(),
            mining:               MiningConfig::default(),
            heuristic_table:      None,
            scheduler:            SchedulerConfig::default(),
            mending:              MendingConfig::default(),
            weather:              WeatherConfig::default(),
            salvage:              SalvageConfig::default(),
        }
    }
}

impl WearConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: WearConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&raw)?;
        info!(
            path = %path.display(),
            tiers = config.bonus_tiers.len(),
            per_item = config.per_item_multipliers.len(),
            mode = ?config.mining.mode,
            "wear configuration loaded"
        );
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> EngineResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject structurally unusable settings.
    pub fn validate(&self) -> EngineResult<()> {
        if self.scheduler.interval_ticks == 0 {
            return Err(EngineError::Config("scheduler.interval_ticks must be at least 1".into()));
        }
        if self.low_alert.threshold_percent > 100 {
            return Err(EngineError::Config(format!(
                "low_alert.threshold_percent {} is above 100",
                self.low_alert.threshold_percent
            )));
        }
        let smooth = &self.mining.smooth;
        if smooth.min_level > smooth.max_level {
            return Err(EngineError::Config(format!(
                "mining.smooth.min_level {} exceeds max_level {}",
                smooth.min_level, smooth.max_level
            )));
        }
        if smooth.min_duration_ticks > smooth.max_duration_ticks {
            return Err(EngineError::Config(format!(
                "mining.smooth.min_duration_ticks {} exceeds max_duration_ticks {}",
                smooth.min_duration_ticks, smooth.max_duration_ticks
            )));
        }
        Ok(())
    }

    // ── Component assembly ────────────────────────────────────────────────

    pub fn resolver(&self) -> MultiplierResolver {
        let tiers = self.bonus_tiers.iter().map(|t| BonusTier::new(t.tag.clone(), t.factor)).collect();
        let mut resolver = MultiplierResolver::new(self.global_multiplier)
            .with_categories(parse_matcher(&self.per_item_multipliers))
            .with_tiers(tiers);
        for (category, &default) in &self.special_defaults {
            resolver = resolver.with_special_default(category.as_str(), default);
        }
        for (context, &factor) in &self.context_multipliers {
            resolver = resolver.with_context(context.clone(), factor);
        }
        resolver
    }

    pub fn policy(&self) -> WearPolicy {
        WearPolicy {
            include_armor:     self.include_armor,
            wrong_tool_blocks: self.wrong_tool.blocks.factor(),
            wrong_tool_combat: self.wrong_tool.combat.factor(),
            axe_is_weapon:     self.axe_is_weapon,
            auto_protect:      self.auto_protect.enabled,
            low_alert:         self.low_alert.enabled.then(|| LowAlertPolicy {
                threshold:      Percent::new(self.low_alert.threshold_percent as i64),
                cooldown_ticks: SchedulerClock::ticks_for_secs(self.low_alert.cooldown_seconds),
            }),
        }
    }

    pub fn degradation(&self) -> DegradationCurves {
        let mining = &self.mining;
        let mut curves = DegradationCurves::default()
            .with_weapon(parse_index(
                Some(&self.degradation.weapon.curve),
                &self.degradation.weapon.per_item,
                1.0,
            ))
            .with_armor(parse_index(
                Some(&self.degradation.armor.curve),
                &self.degradation.armor.per_item,
                1.0,
            ))
            .with_mining_delay(parse_index(
                Some(&mining.duration_curve),
                &mining.per_item_duration_curves,
                1.0,
            ))
            .with_fatigue(parse_index(Some(&mining.fatigue_curve), &mining.per_item_fatigue_curves, 0));

        curves.toggles = DegradationToggles {
            enabled: self.degradation.enabled,
            weapon:  self.degradation.weapon.enabled,
            armor:   self.degradation.armor.enabled,
            mining:  mining.enabled,
        };
        curves.mode = match mining.mode {
            MiningModeSetting::Delay => MiningMode::Delay,
            MiningModeSetting::Effect => MiningMode::Effect,
        };
        curves.style = match mining.style {
            FatigueStyleSetting::Burst => FatigueStyle::Burst { duration_ticks: mining.burst_duration_ticks },
            FatigueStyleSetting::Smooth => FatigueStyle::Smooth {
                min_level:          mining.smooth.min_level,
                max_level:          mining.smooth.max_level,
                min_duration_ticks: mining.smooth.min_duration_ticks,
                max_duration_ticks: mining.smooth.max_duration_ticks,
            },
        };
        curves
    }

    pub fn mending_policy(&self) -> MendingPolicy {
        MendingPolicy::new(self.mending.factor).with_non_repairable(self.mending.non_repairable.iter().cloned())
    }

    pub fn weather_wear(&self) -> WeatherWear {
        let w = &self.weather;
        let mut weather = WeatherWear::default().with_prefixes(&w.tool_prefixes, &w.armor_prefixes, &w.exempt_tiers);
        weather.enabled = w.enabled;
        weather.period_ticks = SchedulerClock::ticks_for_secs(w.period_seconds.max(1));
        weather.affect_tools = w.affect_tools;
        weather.affect_armor = w.affect_armor;
        weather
    }

    pub fn salvage_policy(&self) -> SalvagePolicy {
        let cfg = &self.salvage;
        let mut policy = SalvagePolicy::new(cfg.drop_count_min, cfg.drop_count_max);
        policy.enabled = cfg.enabled;
        policy.also_on_auto_protect = cfg.also_on_auto_protect;

        for matcher in &cfg.matchers {
            let when = &matcher.when;
            let mut rule = SalvageRule::new(matcher.drops.iter().map(String::as_str));
            rule.category = non_blank(&when.category).map(Into::into);
            rule.model_data = when.model_data;
            rule.name_contains = non_blank(&when.name_contains).map(str::to_owned);
            rule.lore_contains = non_blank(&when.lore_contains).map(str::to_owned);
            policy = policy.with_rule(rule);
        }
        for (category, drops) in &cfg.per_item {
            policy = policy.with_item_pool(category.as_str(), drops.iter().map(String::as_str));
        }
        for (tier, drops) in &cfg.per_tier {
            policy = policy.with_tier_pool(tier.clone(), drops.iter().map(String::as_str));
        }
        policy
    }

    /// The standard estimator, over the CSV table when one is configured.
    pub fn estimator(&self) -> EngineResult<DurationEstimator> {
        match &self.heuristic_table {
            Some(path) => Ok(DurationEstimator::with_table(load_heuristic_csv(path)?)),
            None => Ok(DurationEstimator::default()),
        }
    }

    pub fn timeout_ticks(&self) -> u64 {
        SchedulerClock::ticks_for_secs(self.scheduler.timeout_seconds)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
