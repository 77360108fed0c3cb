//! `wear-action`: timed harvesting actions whose length depends on wear.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`host`]      | `ActionHost`: what the core may ask the host about actors    |
//! | [`estimate`]  | `DurationStrategy`, built-in strategies, `DurationEstimator` |
//! | [`heuristic`] | `HeuristicTable` + CSV loader                                |
//! | [`action`]    | `TrackedAction`, `ProgressStage`                             |
//! | [`tracker`]   | `ActionTracker`: one in-progress action per actor            |
//! | [`stage`]     | `StageCache`: suppresses repeated stage updates              |
//! | [`error`]     | `ActionError`, `ActionResult<T>`                             |
//!
//! # Action lifecycle
//!
//! ```text
//!            begin                 step: accrued ≥ target
//!  absent ──────────▶ active ─────────────────────────────▶ Completed ─┐
//!                     │  ▲ begin (same target + tool):                  │
//!                     │  └─ accrued := 0                                │
//!                     ├── step: host no longer valid ─────▶ Aborted ───┤
//!                     ├── step: idle past timeout ────────▶ TimedOut ──┤
//!                     └── cancel / target changed ───────▶ Aborted ───┴─▶ absent
//! ```
//!
//! Only `Completed` finalizes; every terminal state clears the stage.
//!
//! # Timing
//!
//! ```text
//! baseline     = first Some(..) of the estimator strategies
//! scale        = max(1.0, duration factor at the tool's wear)
//! target_ticks = max(2, round(baseline × scale))
//! stage        = min(9, ⌊10 × accrued / target_ticks⌋)
//! ```

pub mod action;
pub mod error;
pub mod estimate;
pub mod heuristic;
pub mod host;
pub mod stage;
pub mod tracker;


pub use action::{ProgressStage, TrackedAction};
pub use error::{ActionError, ActionResult};
pub use estimate::{
    ActorSpeedStrategy, DurationEstimator, DurationStrategy, HeuristicStrategy, TargetSpeedStrategy,
    speed_to_ticks,
};
pub use heuristic::{HeuristicTable, load_heuristic_csv, load_heuristic_reader};
pub use host::ActionHost;
pub use stage::StageCache;
pub use tracker::{ActionTracker, BeginOutcome, StepOutcome, StepReport};

#[cfg(feature = "fx-hash")]
pub(crate) type ActorMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type ActorMap<K, V> = std::collections::HashMap<K, V>;
