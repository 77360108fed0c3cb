//! The `Curve` step function.
//!
//! # Semantics
//!
//! Points are stored sorted by threshold so lookup is a binary search.  A
//! lookup at percent `p` returns the value of the first threshold `≥ p`
//! (ceiling); past the last threshold it returns the last value.  A curve is
//! never empty: building one from no points yields a constant curve of the
//! caller's default, with entries at 0 and 100.

use std::collections::BTreeMap;

use wear_core::Percent;

/// A step function from wear percent to a value.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve<V> {
    /// `(threshold, value)` sorted ascending by threshold, thresholds unique.
    points: Vec<(u8, V)>,
}

/// Real-valued multiplier curve.
pub type FactorCurve = Curve<f64>;

/// Integer level curve (effect strengths).
pub type LevelCurve = Curve<u32>;

impl<V: Copy> Curve<V> {
    /// A curve returning `value` everywhere.
    pub fn constant(value: V) -> Self {
        Self { points: vec![(0, value), (100, value)] }
    }

    /// Build from `(threshold, value)` pairs.
    ///
    /// Thresholds outside `0..=100` are dropped.  If the same threshold is
    /// given twice the later value wins.  No surviving points means a
    /// constant curve of `default`.
    pub fn from_points<I>(points: I, default: V) -> Self
    where
        I: IntoIterator<Item = (i64, V)>,
    {
        let sorted: BTreeMap<u8, V> = points
            .into_iter()
            .filter(|(t, _)| (0..=100).contains(t))
            .map(|(t, v)| (t as u8, v))
            .collect();

        if sorted.is_empty() {
            return Self::constant(default);
        }
        Self { points: sorted.into_iter().collect() }
    }

    /// Ceiling lookup (see module docs).
    pub fn lookup(&self, percent: Percent) -> V {
        let p = percent.get();
        let idx = self.points.partition_point(|&(t, _)| t < p);
        match self.points.get(idx) {
            Some(&(_, v)) => v,
            // `points` is never empty, so `last` always exists.
            None => self.points[self.points.len() - 1].1,
        }
    }

    /// Sorted `(threshold, value)` pairs.
    pub fn points(&self) -> &[(u8, V)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Lookup in an optional curve, falling back to `default` when absent.
#[inline]
pub fn lookup_or<V: Copy>(curve: Option<&Curve<V>>, percent: Percent, default: V) -> V {
    curve.map_or(default, |c| c.lookup(percent))
}
