//! `CategoryCurveIndex`: per-category curve overrides over a global curve.

use wear_core::{Category, Percent};

use crate::{CategoryMatcher, Curve};

/// Resolves the curve for a category: exact override, then prefix family,
/// then the global curve.
///
/// Immutable once built; configuration reloads build a fresh index.
#[derive(Clone, Debug)]
pub struct CategoryCurveIndex<V> {
    overrides: CategoryMatcher<Curve<V>>,
    global:    Curve<V>,
}

impl<V: Copy> CategoryCurveIndex<V> {
    /// An index with no overrides.
    pub fn new(global: Curve<V>) -> Self {
        Self {
            overrides: CategoryMatcher::new(),
            global,
        }
    }

    /// An index whose every lookup returns `value`.
    pub fn constant(value: V) -> Self {
        Self::new(Curve::constant(value))
    }

    /// Build from a prepared override matcher.
    pub fn with_overrides(global: Curve<V>, overrides: CategoryMatcher<Curve<V>>) -> Self {
        Self { overrides, global }
    }

    /// The curve that applies to `category`.
    pub fn resolve(&self, category: &Category) -> &Curve<V> {
        self.overrides.find_or(category, &self.global)
    }

    /// Per-category override only (`None` when the global curve would apply).
    pub fn find_override(&self, category: &Category) -> Option<&Curve<V>> {
        self.overrides.find(category)
    }

    /// Resolve and look up in one step.
    #[inline]
    pub fn lookup(&self, category: &Category, percent: Percent) -> V {
        self.resolve(category).lookup(percent)
    }

    pub fn global(&self) -> &Curve<V> {
        &self.global
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}
