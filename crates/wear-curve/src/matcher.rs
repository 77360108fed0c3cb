//! `CategoryMatcher`: exact-name and prefix-family lookup.
//!
//! Configuration may key a value by an exact category (`"IRON_PICKAXE"`) or
//! by a prefix family (`"DIAMOND_*"`, stored as the prefix `"DIAMOND_"`).
//!
//! # Precedence
//!
//! 1. Exact category match.
//! 2. Longest prefix that is a literal prefix of the category name.
//!
//! Prefixes are kept sorted longest-first (ties broken lexicographically) so
//! the first hit of a linear scan is the winner and the result never depends
//! on map iteration order.

use std::collections::HashMap;

use wear_core::Category;

/// Maps categories to values by exact name or longest matching prefix.
#[derive(Clone, Debug)]
pub struct CategoryMatcher<T> {
    exact:    HashMap<Category, T>,
    /// Sorted longest-first; prefixes unique.
    prefixes: Vec<(String, T)>,
}

impl<T> Default for CategoryMatcher<T> {
    fn default() -> Self {
        Self {
            exact:    HashMap::new(),
            prefixes: Vec::new(),
        }
    }
}

impl<T> CategoryMatcher<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value for exactly `category`, replacing any previous one.
    pub fn insert_exact(&mut self, category: impl Into<Category>, value: T) {
        self.exact.insert(category.into(), value);
    }

    /// Register a value for every category starting with `prefix`.
    pub fn insert_prefix(&mut self, prefix: impl Into<String>, value: T) {
        let prefix = prefix.into();
        match self.prefixes.iter_mut().find(|(p, _)| *p == prefix) {
            Some(slot) => slot.1 = value,
            None => {
                self.prefixes.push((prefix, value));
                self.prefixes
                    .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            }
        }
    }

    /// Resolve `category` (see module docs for precedence).
    pub fn find(&self, category: &Category) -> Option<&T> {
        if let Some(v) = self.exact.get(category) {
            return Some(v);
        }
        self.prefixes
            .iter()
            .find(|(p, _)| category.has_prefix(p))
            .map(|(_, v)| v)
    }

    /// Resolve `category`, or `fallback` when nothing matches.
    pub fn find_or<'a>(&'a self, category: &Category, fallback: &'a T) -> &'a T {
        self.find(category).unwrap_or(fallback)
    }

    /// Number of exact plus prefix entries.
    pub fn len(&self) -> usize {
        self.exact.len() + self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured prefixes, in match order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(|(p, _)| p.as_str())
    }
}
