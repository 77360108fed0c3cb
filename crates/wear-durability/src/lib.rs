//! `wear-durability`: how much wear an event causes and what wear does.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`multiplier`]  | `MultiplierResolver`, `BonusTier`, `TagSet`                |
//! | [`accumulator`] | `WearAccumulator`: expectation-preserving integer rounding |
//! | [`service`]     | `DurabilityService`, `WearPolicy`, `WearOutcome`           |
//! | [`degrade`]     | `DegradationCurves`: weapon, armour, fatigue effects       |
//! | [`mending`]     | `MendingPolicy`                                            |
//! | [`salvage`]     | `SalvagePolicy`, `SalvageRule`: drops for used-up items    |
//! | [`weather`]     | `WeatherWear`                                              |
//!
//! # Wear event pipeline (summary)
//!
//! ```text
//! factor   = resolve(tags, category, context) × wrong-tool marks
//! factor ≤ 0            → Negated
//! delta    = WearAccumulator::apply(base, factor, rng)
//! would break + protect → Protected (held at last point, flagged broken)
//! otherwise             → Applied { delta, breaks, low_alert }
//! used up               → salvage rolled from the item's pool
//! ```
//!
//! Nothing here returns an error: bad input degrades to identity / no wear.

pub mod accumulator;
pub mod degrade;
pub mod mending;
pub mod multiplier;
pub mod salvage;
pub mod service;
pub mod weather;

#[cfg(test)]
mod tests;

pub use accumulator::WearAccumulator;
pub use degrade::{DegradationCurves, DegradationToggles, FatigueEffect, FatigueStyle, MiningMode};
pub use mending::MendingPolicy;
pub use multiplier::{BonusTier, MultiplierBreakdown, MultiplierResolver, NoTags, TagSet};
pub use salvage::{SalvagePolicy, SalvageRule};
pub use service::{DurabilityService, LowAlertPolicy, WearOutcome, WearPolicy, WearRequest};
pub use weather::WeatherWear;
