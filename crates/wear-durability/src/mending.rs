//! Scaling of repair-by-experience ("mending") amounts.

use std::collections::HashSet;

use tracing::trace;
use wear_core::Category;

/// Scales incoming repair and blocks it for non-repairable categories.
#[derive(Clone, Debug, PartialEq)]
pub struct MendingPolicy {
    pub factor:     f64,
    non_repairable: HashSet<Category>,
}

impl Default for MendingPolicy {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl MendingPolicy {
    pub fn new(factor: f64) -> Self {
        Self { factor, non_repairable: HashSet::new() }
    }

    pub fn with_non_repairable<I, C>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        self.non_repairable.extend(categories.into_iter().map(Into::into));
        self
    }

    /// `false` for categories that must never be repaired (mending or anvil).
    pub fn repairable(&self, category: &Category) -> bool {
        !self.non_repairable.contains(category)
    }

    /// Repair points to apply for an incoming `amount`, or `None` to cancel
    /// the repair entirely.
    pub fn mend(&self, category: &Category, amount: u32) -> Option<u32> {
        if !self.repairable(category) || !(self.factor > 0.0) {
            return None;
        }
        let scaled = (amount as f64 * self.factor).floor().min(u32::MAX as f64) as u32;
        trace!(%category, amount, scaled, "mending scaled");
        (scaled > 0).then_some(scaled)
    }
}
