//! `WeatherWear`: slow wear on equipment exposed to storms.
//!
//! Every `period_ticks` the host lists actors standing in a storming
//! context; each of their equipped items that [`WeatherWear::affects`]
//! loses one point, never past its wear budget.

use tracing::trace;
use wear_core::{EquipSlot, ItemState, Tick};

#[derive(Clone, Debug, PartialEq)]
pub struct WeatherWear {
    pub enabled:      bool,
    pub period_ticks: u64,
    pub affect_tools: bool,
    pub affect_armor: bool,
    /// Normalised to `"<PREFIX>_"`.
    tool_prefixes:    Vec<String>,
    armor_prefixes:   Vec<String>,
    exempt:           Vec<String>,
    last_pass:        Option<Tick>,
}

impl Default for WeatherWear {
    fn default() -> Self {
        Self {
            enabled:        true,
            period_ticks:   5 * wear_core::TICKS_PER_SECOND as u64,
            affect_tools:   true,
            affect_armor:   true,
            tool_prefixes:  Vec::new(),
            armor_prefixes: Vec::new(),
            exempt:         Vec::new(),
            last_pass:      None,
        }
    }
}

fn normalise(prefixes: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<String> {
    prefixes
        .into_iter()
        .map(|p| p.as_ref().trim().to_ascii_uppercase())
        .filter(|p| !p.is_empty())
        .map(|p| format!("{p}_"))
        .collect()
}

impl WeatherWear {
    /// Prefixes are material tiers (`"IRON"`, `"GOLDEN"`); matching requires
    /// the tier to be followed by `_` in the category name.
    pub fn with_prefixes(
        mut self,
        tools:  impl IntoIterator<Item = impl AsRef<str>>,
        armor:  impl IntoIterator<Item = impl AsRef<str>>,
        exempt: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        self.tool_prefixes = normalise(tools);
        self.armor_prefixes = normalise(armor);
        self.exempt = normalise(exempt);
        self
    }

    /// `true` if `item` in `slot` takes storm wear.
    pub fn affects(&self, item: &ItemState, slot: EquipSlot) -> bool {
        if !self.enabled || !item.supports_wear() {
            return false;
        }
        let (on, allowed) = if slot.is_armor() {
            (self.affect_armor, &self.armor_prefixes)
        } else {
            (self.affect_tools, &self.tool_prefixes)
        };
        if !on {
            return false;
        }
        let exposed = allowed.iter().any(|p| item.category.has_prefix(p));
        exposed && !self.exempt.iter().any(|p| item.category.has_prefix(p))
    }

    /// `true` once per period; the first call after enabling is due.
    pub fn due(&mut self, now: Tick) -> bool {
        if !self.enabled {
            return false;
        }
        match self.last_pass {
            Some(last) if now.since(last) < self.period_ticks => false,
            _ => {
                self.last_pass = Some(now);
                true
            }
        }
    }

    /// Wear every affected item by one point; returns how many were worn.
    pub fn wear_pass<'a>(
        &self,
        equipment: impl IntoIterator<Item = (EquipSlot, &'a mut ItemState)>,
    ) -> usize {
        let mut worn = 0;
        for (slot, item) in equipment {
            if !self.affects(item, slot) || item.remaining() == 0 {
                continue;
            }
            item.damage += 1;
            worn += 1;
            trace!(?slot, category = %item.category, damage = item.damage, "storm wear");
        }
        worn
    }
}
