//! The `ActionHost` trait: the core's read-only window into the world.

use wear_core::{ActorId, Category, TargetId, TargetInfo};

/// Queries the tracker and estimator make against the host.
///
/// Only the three validity queries are required.  The speed queries are
/// optional capabilities: a host that cannot answer returns `None` (the
/// default) and the estimator falls through to the next strategy.
///
/// Implementations must be cheap and must not call back into the engine.
pub trait ActionHost {
    /// `false` once the actor has left the world.
    fn actor_present(&self, actor: ActorId) -> bool;

    /// `true` while the actor is still aiming at `target`.
    fn still_targets(&self, actor: ActorId, target: TargetId) -> bool;

    /// Category of the tool currently held, `None` when empty-handed.
    fn held_tool(&self, actor: ActorId) -> Option<Category>;

    /// Whether [`actor_speed`][Self::actor_speed] is meaningful on this host.
    fn supports_speed_attribute(&self) -> bool {
        false
    }

    /// Actor-specific harvesting speed, in targets per second.
    fn actor_speed(&self, _actor: ActorId) -> Option<f64> {
        None
    }

    /// Target-specific harvesting speed for `tool`, in targets per second.
    fn target_speed(&self, _target: &TargetInfo, _tool: &Category) -> Option<f64> {
        None
    }
}
