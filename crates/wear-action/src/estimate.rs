//! Baseline action duration, from an ordered list of strategies.
//!
//! Strategies are tried in order and the first `Some` wins.  The default
//! estimator is:
//!
//! 1. [`ActorSpeedStrategy`]: the actor's own speed attribute, when the
//!    host supports one;
//! 2. [`TargetSpeedStrategy`]: the target's speed for the held tool;
//! 3. [`HeuristicStrategy`]: a static table that always answers.
//!
//! Strategies fail soft: an unavailable or nonsensical reading is `None`.

use wear_core::{ActorId, TargetInfo, ToolSnapshot, TICKS_PER_SECOND};

use crate::{ActionHost, HeuristicTable};

/// Convert a speed (targets per second) into ticks.
///
/// `None` for zero, negative and non-finite speeds; otherwise at least 1.
pub fn speed_to_ticks(speed: f64) -> Option<u64> {
    if !speed.is_finite() || speed <= 0.0 {
        return None;
    }
    let ticks = (TICKS_PER_SECOND as f64 / speed).round();
    Some((ticks as u64).max(1))
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// One source of baseline durations.
pub trait DurationStrategy {
    /// Baseline ticks for `actor` working `target` with `tool`, or `None` to
    /// defer to the next strategy.
    fn estimate(
        &self,
        host:   &dyn ActionHost,
        actor:  ActorId,
        target: &TargetInfo,
        tool:   &ToolSnapshot,
    ) -> Option<u64>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

// ── Built-in strategies ───────────────────────────────────────────────────────

pub struct ActorSpeedStrategy;

impl DurationStrategy for ActorSpeedStrategy {
    fn estimate(
        &self,
        host:    &dyn ActionHost,
        actor:   ActorId,
        _target: &TargetInfo,
        _tool:   &ToolSnapshot,
    ) -> Option<u64> {
        if !host.supports_speed_attribute() {
            return None;
        }
        host.actor_speed(actor).and_then(speed_to_ticks)
    }

    fn name(&self) -> &'static str {
        "actor-speed"
    }
}

pub struct TargetSpeedStrategy;

impl DurationStrategy for TargetSpeedStrategy {
    fn estimate(
        &self,
        host:   &dyn ActionHost,
        _actor: ActorId,
        target: &TargetInfo,
        tool:   &ToolSnapshot,
    ) -> Option<u64> {
        host.target_speed(target, &tool.category).and_then(speed_to_ticks)
    }

    fn name(&self) -> &'static str {
        "target-speed"
    }
}

/// Static fallback backed by a [`HeuristicTable`].
pub struct HeuristicStrategy(pub HeuristicTable);

impl DurationStrategy for HeuristicStrategy {
    fn estimate(
        &self,
        _host:  &dyn ActionHost,
        _actor: ActorId,
        target: &TargetInfo,
        tool:   &ToolSnapshot,
    ) -> Option<u64> {
        Some(self.0.ticks(target, &tool.category))
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

// ── DurationEstimator ─────────────────────────────────────────────────────────

pub struct DurationEstimator {
    strategies: Vec<Box<dyn DurationStrategy>>,
    /// Used when every strategy defers.
    fallback:   u64,
}

impl Default for DurationEstimator {
    fn default() -> Self {
        Self::with_table(HeuristicTable::default())
    }
}

impl DurationEstimator {
    /// The standard three-tier estimator over `table`.
    pub fn with_table(table: HeuristicTable) -> Self {
        let fallback = table.undesignated_ticks();
        Self {
            strategies: vec![
                Box::new(ActorSpeedStrategy),
                Box::new(TargetSpeedStrategy),
                Box::new(HeuristicStrategy(table)),
            ],
            fallback,
        }
    }

    /// An estimator with a custom strategy list.
    pub fn from_strategies(strategies: Vec<Box<dyn DurationStrategy>>, fallback: u64) -> Self {
        Self { strategies, fallback: fallback.max(1) }
    }

    /// Baseline ticks; always at least 1.
    pub fn estimate(
        &self,
        host:   &dyn ActionHost,
        actor:  ActorId,
        target: &TargetInfo,
        tool:   &ToolSnapshot,
    ) -> u64 {
        self.estimate_with_source(host, actor, target, tool).0
    }

    /// Baseline ticks plus the name of the strategy that produced them.
    pub fn estimate_with_source(
        &self,
        host:   &dyn ActionHost,
        actor:  ActorId,
        target: &TargetInfo,
        tool:   &ToolSnapshot,
    ) -> (u64, &'static str) {
        self.strategies
            .iter()
            .find_map(|s| s.estimate(host, actor, target, tool).map(|t| (t.max(1), s.name())))
            .unwrap_or((self.fallback, "fallback"))
    }
}
