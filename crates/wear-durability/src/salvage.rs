//! Salvage: material drops rolled when an item is used up.
//!
//! # Pool lookup
//!
//! | Order | Source   | Key                                             |
//! |-------|----------|-------------------------------------------------|
//! | 1     | rules    | first [`SalvageRule`] whose conditions all hold |
//! | 2     | per item | exact category name                             |
//! | 3     | per tier | category name up to the first `_`               |
//!
//! The first non-empty pool wins.  The drop count is uniform in
//! `[count_min, count_max]`; each drop is drawn uniformly from the pool.

use std::collections::BTreeMap;

use tracing::debug;
use wear_core::{Category, ItemState, WearRng};

// ── SalvageRule ───────────────────────────────────────────────────────────────

/// Pool selected by item identity and label.  Unset conditions always hold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SalvageRule {
    pub category:      Option<Category>,
    pub model_data:    Option<i64>,
    pub name_contains: Option<String>,
    pub lore_contains: Option<String>,
    pub drops:         Vec<Category>,
}

impl SalvageRule {
    pub fn new<I, C>(drops: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        Self { drops: drops.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    pub fn for_category(mut self, category: impl Into<Category>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_model_data(mut self, model_data: i64) -> Self {
        self.model_data = Some(model_data);
        self
    }

    pub fn with_name(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    pub fn with_lore(mut self, needle: impl Into<String>) -> Self {
        self.lore_contains = Some(needle.into());
        self
    }

    pub fn matches(&self, item: &ItemState) -> bool {
        let label = &item.label;
        self.category.as_ref().is_none_or(|c| c.as_str().eq_ignore_ascii_case(item.category.as_str()))
            && self.model_data.is_none_or(|m| label.model_data == Some(m))
            && self.name_contains.as_deref().is_none_or(|n| label.name_contains(n))
            && self.lore_contains.as_deref().is_none_or(|l| label.lore_contains(l))
    }
}

// ── SalvagePolicy ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct SalvagePolicy {
    pub enabled:              bool,
    /// Also roll when auto-protect holds an item instead of breaking it.
    pub also_on_auto_protect: bool,
    count_min:                u32,
    count_max:                u32,
    rules:                    Vec<SalvageRule>,
    per_item:                 BTreeMap<Category, Vec<Category>>,
    per_tier:                 BTreeMap<String, Vec<Category>>,
}

impl Default for SalvagePolicy {
    fn default() -> Self {
        Self::new(1, 2)
    }
}

impl SalvagePolicy {
    /// `count_max` below `count_min` is raised to it.
    pub fn new(count_min: u32, count_max: u32) -> Self {
        Self {
            enabled: true,
            also_on_auto_protect: false,
            count_min,
            count_max: count_max.max(count_min),
            rules: Vec::new(),
            per_item: BTreeMap::new(),
            per_tier: BTreeMap::new(),
        }
    }

    /// Rules are tried in insertion order.  Rules without drops are ignored.
    pub fn with_rule(mut self, rule: SalvageRule) -> Self {
        let drops = normalize(rule.drops);
        if !drops.is_empty() {
            self.rules.push(SalvageRule { drops, ..rule });
        }
        self
    }

    pub fn with_item_pool<I, C>(mut self, category: impl Into<Category>, drops: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        let drops = normalize(drops.into_iter().map(Into::into));
        if !drops.is_empty() {
            self.per_item.insert(category.into(), drops);
        }
        self
    }

    pub fn with_tier_pool<I, C>(mut self, tier: impl Into<String>, drops: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        let drops = normalize(drops.into_iter().map(Into::into));
        if !drops.is_empty() {
            self.per_tier.insert(tier.into(), drops);
        }
        self
    }

    pub fn count_range(&self) -> (u32, u32) {
        (self.count_min, self.count_max)
    }

    /// The drop pool for `item`; empty when nothing is configured for it.
    pub fn pool(&self, item: &ItemState) -> &[Category] {
        if let Some(rule) = self.rules.iter().find(|r| r.matches(item)) {
            return &rule.drops;
        }
        if let Some(drops) = self.per_item.get(&item.category) {
            return drops;
        }
        self.per_tier.get(tier_of(&item.category)).map_or(&[], Vec::as_slice)
    }

    /// Roll the drops for `item`.  Nothing is drawn from `rng` when salvage
    /// is off or the pool is empty.
    pub fn roll(&self, item: &ItemState, rng: &mut WearRng) -> Vec<Category> {
        if !self.enabled {
            return Vec::new();
        }
        let pool = self.pool(item);
        if pool.is_empty() {
            return Vec::new();
        }
        let span = (self.count_max - self.count_min) as usize + 1;
        let count = self.count_min as usize + rng.below(span);
        let drops: Vec<Category> = (0..count).map(|_| pool[rng.below(pool.len())].clone()).collect();
        debug!(category = %item.category, count, "salvage rolled");
        drops
    }
}

/// Category name up to the first `_`; the whole name when there is none
/// (or it leads).
fn tier_of(category: &Category) -> &str {
    let name = category.as_str();
    match name.find('_') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    }
}

/// Upper-case drop names and discard blanks.
fn normalize(drops: impl IntoIterator<Item = Category>) -> Vec<Category> {
    drops
        .into_iter()
        .map(|c| c.as_str().trim().to_uppercase())
        .filter(|n| !n.is_empty() && n != "AIR")
        .map(Category::from)
        .collect()
}
