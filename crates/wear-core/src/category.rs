//! Item and target classification keys.
//!
//! A [`Category`] is the host's material / item-family name
//! (`"DIAMOND_PICKAXE"`, `"IRON_HELMET"`, `"STONE"`).  Curves and
//! multipliers are selected by exact category or by category-name prefix,
//! so the name is kept verbatim.
//!
//! A [`ToolClass`] is the coarse harvesting role of a tool, derived from
//! the category-name suffix.  Targets may carry a *designation*: the tool
//! class they are meant to be harvested with.

use std::fmt;
use std::str::FromStr;

use crate::WearError;

// ── Category ──────────────────────────────────────────────────────────────────

/// A material / item-family name as reported by the host.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` if the name starts with `prefix` (literal, case-sensitive).
    #[inline]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Armour pieces and wing-type chest items.
    pub fn is_armor(&self) -> bool {
        let n = self.as_str();
        n.ends_with("_HELMET")
            || n.ends_with("_CHESTPLATE")
            || n.ends_with("_LEGGINGS")
            || n.ends_with("_BOOTS")
            || n == "ELYTRA"
    }

    /// Melee or ranged weapons.  Axes count only when `axe_is_weapon`.
    pub fn is_weapon(&self, axe_is_weapon: bool) -> bool {
        let n = self.as_str();
        if n.ends_with("_SWORD") {
            return true;
        }
        if axe_is_weapon && ToolClass::of(self) == Some(ToolClass::Axe) {
            return true;
        }
        matches!(n, "BOW" | "CROSSBOW" | "TRIDENT")
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category(s.to_owned())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── ToolClass ─────────────────────────────────────────────────────────────────

/// Harvesting role of a tool, derived from its category suffix.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolClass {
    Pickaxe,
    Shovel,
    Axe,
    Hoe,
}

impl ToolClass {
    pub const ALL: [ToolClass; 4] = [
        ToolClass::Pickaxe,
        ToolClass::Shovel,
        ToolClass::Axe,
        ToolClass::Hoe,
    ];

    /// Category-name suffix that identifies a tool of this class.
    pub fn suffix(self) -> &'static str {
        match self {
            ToolClass::Pickaxe => "_PICKAXE",
            ToolClass::Shovel  => "_SHOVEL",
            ToolClass::Axe     => "_AXE",
            ToolClass::Hoe     => "_HOE",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolClass::Pickaxe => "pickaxe",
            ToolClass::Shovel  => "shovel",
            ToolClass::Axe     => "axe",
            ToolClass::Hoe     => "hoe",
        }
    }

    /// Classify a tool category; `None` for anything that is not a tool.
    pub fn of(category: &Category) -> Option<ToolClass> {
        let n = category.as_str();
        Self::ALL.into_iter().find(|c| n.ends_with(c.suffix()))
    }

    /// `true` if `tool` belongs to this class.
    #[inline]
    pub fn fits(self, tool: &Category) -> bool {
        tool.as_str().ends_with(self.suffix())
    }
}

impl FromStr for ToolClass {
    type Err = WearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pickaxe" => Ok(ToolClass::Pickaxe),
            "shovel"  => Ok(ToolClass::Shovel),
            "axe"     => Ok(ToolClass::Axe),
            "hoe"     => Ok(ToolClass::Hoe),
            other => Err(WearError::Parse(format!(
                "invalid tool class {other:?}: expected pickaxe, shovel, axe, or hoe"
            ))),
        }
    }
}

impl fmt::Display for ToolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
