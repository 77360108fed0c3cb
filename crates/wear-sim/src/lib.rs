//! `wear-sim`: scheduler, configuration and host facade for the wear core.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`config`]    | `WearConfig`: YAML surface and component assembly         |
//! | [`scheduler`] | `TickScheduler`: fixed-period pass over tracked actions   |
//! | [`signal`]    | `Signal`, `SignalInbox`: thread-safe deferred host events |
//! | [`observer`]  | `EngineObserver`, `NoopObserver`, `PassReport`            |
//! | [`engine`]    | `WearEngine`: the facade hosts call into                  |
//! | [`builder`]   | `EngineBuilder`                                           |
//! | [`error`]     | `EngineError`, `EngineResult<T>`                          |
//!
//! # One pass
//!
//! ```text
//! tick_pulse(host, observer):
//!   ① Signals : drain the inbox; Begin / Cancel / TargetChanged / ActorLeft
//!                are applied in arrival order.
//!   ② Clock   : current_tick += interval.
//!   ③ Step    : every tracked action, ascending ActorId:
//!                  actor gone        → Clear
//!                  no longer valid   → Clear
//!                  idle past timeout → Clear
//!                  otherwise accrued += interval;
//!                    finished → Clear, finalize_action (once)
//!                    else     → stage (repeats filtered)
//!   ④ Report  : observer.on_pass_end(PassReport)
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                               |
//! |-----------|------------------------------------------------------|
//! | `fx-hash` | FxHash maps for the per-actor action and stage maps. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wear_sim::{EngineBuilder, NoopObserver, WearConfig};
//!
//! let config = WearConfig::from_yaml_str("seed: 7")?;
//! let mut engine = EngineBuilder::new(config).build()?;
//! engine.begin_action(&host, actor, target, &pickaxe, &mut NoopObserver);
//! loop {
//!     engine.tick_pulse(&host, &mut NoopObserver);
//! }
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod signal;


pub use builder::EngineBuilder;
pub use config::{
    AutoProtectConfig, BonusTierConfig, CurveSection, DegradationConfig, FatigueStyleSetting, LowAlertConfig,
    MendingConfig, MiningConfig, MiningModeSetting, PenaltyConfig, SalvageConfig, SalvageMatcherConfig, SalvageWhen,
    SchedulerConfig, SmoothConfig, WeatherConfig, WearConfig, WrongToolConfig,
};
pub use engine::WearEngine;
pub use error::{EngineError, EngineResult};
pub use observer::{EngineObserver, NoopObserver, PassReport};
pub use scheduler::TickScheduler;
pub use signal::{Signal, SignalInbox};
