//! Build curves and matchers from string-keyed configuration maps.
//!
//! # Key format
//!
//! Curve sections map integer percent thresholds, written as strings, to
//! values:
//!
//! ```yaml
//! curve:
//!   "100": 1.0
//!   "50":  1.25
//!   "10":  2.0
//! ```
//!
//! Category sections map a category name or a prefix family to a value:
//!
//! | Key            | Meaning                                 |
//! |----------------|-----------------------------------------|
//! | `IRON_PICKAXE` | exact category                          |
//! | `DIAMOND_*`    | every category starting with `DIAMOND_` |
//!
//! Malformed thresholds are skipped and logged at `debug`; they are never
//! fatal.  Category names cannot be validated here (the host defines them),
//! so every category key is accepted.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{CategoryCurveIndex, CategoryMatcher, Curve};

/// Trailing marker that turns a category key into a prefix family.
pub const PREFIX_WILDCARD: char = '*';

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a threshold map into a curve.
///
/// Keys that are not integers in `0..=100` are skipped.  An empty or fully
/// invalid map yields a constant curve of `default`.
pub fn parse_curve<V: Copy>(raw: &BTreeMap<String, V>, default: V) -> Curve<V> {
    let points = raw.iter().filter_map(|(key, &value)| {
        let threshold = parse_threshold(key)?;
        Some((threshold, value))
    });
    Curve::from_points(points, default)
}

/// Parse a category-keyed map into a matcher (`*` suffix → prefix family).
pub fn parse_matcher<T: Clone>(raw: &BTreeMap<String, T>) -> CategoryMatcher<T> {
    let mut matcher = CategoryMatcher::new();
    for (key, value) in raw {
        insert_key(&mut matcher, key, value.clone());
    }
    matcher
}

/// Parse a global curve plus per-category curves into an index.
///
/// A missing global section means a constant `default` curve.
pub fn parse_index<V: Copy>(
    global:   Option<&BTreeMap<String, V>>,
    per_item: &BTreeMap<String, BTreeMap<String, V>>,
    default:  V,
) -> CategoryCurveIndex<V> {
    let global_curve = match global {
        Some(raw) => parse_curve(raw, default),
        None => Curve::constant(default),
    };

    let mut overrides = CategoryMatcher::new();
    for (key, raw) in per_item {
        insert_key(&mut overrides, key, parse_curve(raw, default));
    }
    CategoryCurveIndex::with_overrides(global_curve, overrides)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn insert_key<T>(matcher: &mut CategoryMatcher<T>, key: &str, value: T) {
    let key = key.trim();
    match key.strip_suffix(PREFIX_WILDCARD) {
        Some(prefix) => matcher.insert_prefix(prefix, value),
        None => matcher.insert_exact(key, value),
    }
}

fn parse_threshold(key: &str) -> Option<i64> {
    match key.trim().parse::<i64>() {
        Ok(t) if (0..=100).contains(&t) => Some(t),
        Ok(t) => {
            debug!(threshold = t, "skipping curve threshold outside 0..=100");
            None
        }
        Err(_) => {
            debug!(key, "skipping non-integer curve threshold");
            None
        }
    }
}
