//! `wear-core`: foundational types for the wear simulation core.
//!
//! This crate is a dependency of every other `wear-*` crate.  It has no
//! `wear-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                            |
//! |--------------|---------------------------------------------------------------------|
//! | [`ids`]      | `ActorId`, `TargetId`                                               |
//! | [`time`]     | `Tick`, `SchedulerClock`, `TICKS_PER_SECOND`                        |
//! | [`rng`]      | `WearRng` (injected, seedable)                                      |
//! | [`category`] | `Category`, `ToolClass`                                             |
//! | [`item`]     | `ItemState`, `ItemLabel`, `ToolSnapshot`, `TargetInfo`, `EquipSlot` |
//! | [`percent`]  | `Percent`, `PercentUnit`                                            |
//! | [`error`]    | `WearError`, `WearResult`                                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod category;
pub mod error;
pub mod ids;
pub mod item;
pub mod percent;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use category::{Category, ToolClass};
pub use error::{WearError, WearResult};
pub use ids::{ActorId, TargetId};
pub use item::{EquipSlot, ItemLabel, ItemState, TargetInfo, ToolSnapshot};
pub use percent::{Percent, PercentUnit};
pub use rng::WearRng;
pub use time::{SchedulerClock, Tick, TICKS_PER_SECOND};
