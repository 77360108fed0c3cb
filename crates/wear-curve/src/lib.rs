//! `wear-curve`: threshold curves and category-keyed lookup.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`curve`]   | `Curve<V>` step function, `FactorCurve`, `LevelCurve`            |
//! | [`matcher`] | `CategoryMatcher<T>`: exact name, then longest prefix            |
//! | [`index`]   | `CategoryCurveIndex<V>`: per-category curve with global fallback |
//! | [`loader`]  | `parse_curve`, `parse_matcher`, `parse_index` from config maps   |
//!
//! # Lookup model (summary)
//!
//! A curve is a set of integer thresholds `t1 < t2 < … < tn` in `0..=100`:
//!
//! ```text
//! lookup(p) = value(smallest ti ≥ p)      if any ti ≥ p
//!           = value(tn)                   otherwise
//! ```
//!
//! Category resolution tries the exact name, then the longest configured
//! prefix family (`"DIAMOND_*"`), then the global curve.

pub mod curve;
pub mod index;
pub mod loader;
pub mod matcher;


pub use curve::{lookup_or, Curve, FactorCurve, LevelCurve};
pub use index::CategoryCurveIndex;
pub use loader::{parse_curve, parse_index, parse_matcher, PREFIX_WILDCARD};
pub use matcher::CategoryMatcher;
