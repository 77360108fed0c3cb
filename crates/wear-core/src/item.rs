//! Item, tool and target snapshots exchanged with the host.
//!
//! The host owns the real inventory.  It hands the core value snapshots and
//! applies whatever the core decides; the core never holds references into
//! host state.

use crate::{Category, Percent, TargetId, ToolClass};

// ── ItemState ─────────────────────────────────────────────────────────────────

/// Wear state of one item.
///
/// `damage` counts consumed wear points; the item is used up when
/// `damage >= max_wear`.  Items with `max_wear == 0` do not wear at all.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub category: Category,
    pub max_wear: u32,
    pub damage:   u32,
    /// Set by auto-protect when the item is held at its last point.
    pub broken:   bool,
    /// Host-side naming, only read by salvage rules.
    pub label:    ItemLabel,
}

impl ItemState {
    /// A fresh, undamaged item.
    pub fn new(category: impl Into<Category>, max_wear: u32) -> Self {
        Self {
            category: category.into(),
            max_wear,
            damage: 0,
            broken: false,
            label: ItemLabel::default(),
        }
    }

    pub fn with_label(mut self, label: ItemLabel) -> Self {
        self.label = label;
        self
    }

    /// Builder-style damage setter, clamped to `max_wear`.
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage.min(self.max_wear);
        self
    }

    /// Capability check: only items with a wear budget participate.
    #[inline]
    pub fn supports_wear(&self) -> bool {
        self.max_wear > 0
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.max_wear.saturating_sub(self.damage)
    }

    /// Remaining health as a percent (100 for items without wear).
    #[inline]
    pub fn remaining_percent(&self) -> Percent {
        Percent::of_remaining(self.remaining(), self.max_wear)
    }

    /// `true` if applying `delta` more damage would use the item up.
    #[inline]
    pub fn would_break(&self, delta: u32) -> bool {
        self.supports_wear() && self.damage.saturating_add(delta) >= self.max_wear
    }

    /// Freeze identity and wear percent for tracking.
    pub fn snapshot(&self) -> ToolSnapshot {
        ToolSnapshot {
            category: self.category.clone(),
            wear:     self.remaining_percent(),
        }
    }
}

// ── ItemLabel ─────────────────────────────────────────────────────────────────

/// Custom name, lore lines and model tag an item may carry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLabel {
    pub name:       Option<String>,
    pub lore:       Vec<String>,
    pub model_data: Option<i64>,
}

impl ItemLabel {
    /// Case-insensitive substring test on the custom name.
    pub fn name_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.as_deref().is_some_and(|n| n.to_lowercase().contains(&needle))
    }

    /// Case-insensitive substring test over every lore line.
    pub fn lore_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.lore.iter().any(|line| line.to_lowercase().contains(&needle))
    }
}

// ── ToolSnapshot ──────────────────────────────────────────────────────────────

/// Identity and health of the acting tool, captured when an action starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToolSnapshot {
    pub category: Category,
    /// Remaining health at capture time.
    pub wear:     Percent,
}

impl ToolSnapshot {
    pub fn new(category: impl Into<Category>, wear: Percent) -> Self {
        Self { category: category.into(), wear }
    }

    /// Tool identity is its category; wear changes don't make it a new tool.
    #[inline]
    pub fn same_tool(&self, held: &Category) -> bool {
        &self.category == held
    }
}

// ── TargetInfo ────────────────────────────────────────────────────────────────

/// The thing an action is aimed at.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetInfo {
    pub id:          TargetId,
    pub category:    Category,
    /// Tool class the target is meant to be harvested with, if any.
    pub designation: Option<ToolClass>,
}

impl TargetInfo {
    pub fn new(id: TargetId, category: impl Into<Category>, designation: Option<ToolClass>) -> Self {
        Self { id, category: category.into(), designation }
    }

    /// `true` when `tool` is the designated class, or the target has none.
    pub fn accepts(&self, tool: &Category) -> bool {
        match self.designation {
            Some(class) => class.fits(tool),
            None => true,
        }
    }
}

// ── EquipSlot ─────────────────────────────────────────────────────────────────

/// Where an item sits on the actor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipSlot {
    MainHand,
    OffHand,
    Head,
    Chest,
    Legs,
    Feet,
}

impl EquipSlot {
    #[inline]
    pub fn is_armor(self) -> bool {
        matches!(self, EquipSlot::Head | EquipSlot::Chest | EquipSlot::Legs | EquipSlot::Feet)
    }

    #[inline]
    pub fn is_hand(self) -> bool {
        !self.is_armor()
    }
}
