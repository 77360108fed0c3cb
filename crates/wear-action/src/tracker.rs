//! `ActionTracker`: one in-progress action per actor, advanced per pass.

use tracing::debug;
use wear_core::{ActorId, TargetId, TargetInfo, Tick, ToolSnapshot};

use crate::{ActionHost, ActorMap, DurationEstimator, TrackedAction};

/// Shortest action the tracker will schedule.
const MIN_TARGET_TICKS: u64 = 2;

// ── Outcomes ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum BeginOutcome {
    /// No action was in progress.
    Started,
    /// Same target and tool: progress restarted, record kept.
    Refreshed,
    /// A different action was in progress and has been dropped.
    Replaced(TrackedAction),
}

/// What one pass did to one record.  Every variant but `Continue` means the
/// record has been removed and is handed back.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// Still working; the current stage.
    Continue(u8),
    Completed(TrackedAction),
    /// Target, aim, or tool changed.
    Aborted(TrackedAction),
    /// No reaffirm within the timeout.
    TimedOut(TrackedAction),
    /// The actor left the world.
    Departed(TrackedAction),
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    pub actor:   ActorId,
    pub target:  TargetId,
    pub outcome: StepOutcome,
}

// ── ActionTracker ─────────────────────────────────────────────────────────────

/// Owns every tracked action.
///
/// The host never mutates records directly; it calls [`begin`], [`cancel`]
/// and [`abort_target`], and the scheduler calls [`step_all`] once per pass.
///
/// [`begin`]: ActionTracker::begin
/// [`cancel`]: ActionTracker::cancel
/// [`abort_target`]: ActionTracker::abort_target
/// [`step_all`]: ActionTracker::step_all
pub struct ActionTracker {
    estimator:     DurationEstimator,
    actions:       ActorMap<ActorId, TrackedAction>,
    /// Ticks of work credited per pass.
    interval:      u64,
    /// Idle limit in ticks; 0 disables.
    timeout_ticks: u64,
}

impl ActionTracker {
    pub fn new(estimator: DurationEstimator, interval: u64, timeout_ticks: u64) -> Self {
        Self {
            estimator,
            actions: ActorMap::default(),
            interval: interval.max(1),
            timeout_ticks,
        }
    }

    /// Start, refresh, or replace the action of `actor`.
    ///
    /// `scale` is the wear-dependent duration factor; values below 1.0 (and
    /// non-finite ones) count as 1.0, so wear never speeds an action up.
    pub fn begin(
        &mut self,
        host:   &dyn ActionHost,
        actor:  ActorId,
        target: TargetInfo,
        tool:   ToolSnapshot,
        scale:  f64,
        now:    Tick,
    ) -> BeginOutcome {
        let (baseline, source) = self.estimator.estimate_with_source(host, actor, &target, &tool);
        let scale = if scale.is_finite() { scale.max(1.0) } else { 1.0 };
        let target_ticks = ((baseline as f64 * scale).round() as u64).max(MIN_TARGET_TICKS);

        if let Some(existing) = self.actions.get_mut(&actor) {
            if existing.same_target(target.id, &tool.category) {
                existing.target_ticks = target_ticks;
                existing.accrued = 0;
                existing.last_touch = now;
                existing.tool = tool;
                debug!(%actor, target = %target.id, target_ticks, "action refreshed");
                return BeginOutcome::Refreshed;
            }
        }

        debug!(
            %actor, target = %target.id, tool = %tool.category, wear = %tool.wear,
            baseline, source, scale, target_ticks, "action started"
        );
        let action = TrackedAction {
            actor,
            target,
            tool,
            target_ticks,
            accrued: 0,
            started: now,
            last_touch: now,
        };
        match self.actions.insert(actor, action) {
            Some(old) => BeginOutcome::Replaced(old),
            None => BeginOutcome::Started,
        }
    }

    /// Advance every record by one pass at clock time `now`.
    ///
    /// Records are visited in ascending `ActorId` order so reports are
    /// deterministic.
    pub fn step_all(&mut self, host: &dyn ActionHost, now: Tick) -> Vec<StepReport> {
        let mut actors: Vec<ActorId> = self.actions.keys().copied().collect();
        actors.sort_unstable();

        actors
            .into_iter()
            .filter_map(|actor| {
                let target = self.actions.get(&actor)?.target.id;
                let outcome = self.step_one(host, actor, now)?;
                Some(StepReport { actor, target, outcome })
            })
            .collect()
    }

    /// Drop the action of `actor`, if any.
    pub fn cancel(&mut self, actor: ActorId) -> Option<TrackedAction> {
        let removed = self.actions.remove(&actor);
        if removed.is_some() {
            debug!(%actor, "action cancelled");
        }
        removed
    }

    /// Drop every action on `target` (it changed under the actors).
    pub fn abort_target(&mut self, target: TargetId) -> Vec<TrackedAction> {
        let mut actors: Vec<ActorId> = self
            .actions
            .iter()
            .filter(|(_, a)| a.target.id == target)
            .map(|(&actor, _)| actor)
            .collect();
        actors.sort_unstable();
        actors.into_iter().filter_map(|a| self.actions.remove(&a)).collect()
    }

    /// Remove and return every action, ascending by actor.
    pub fn drain_all(&mut self) -> Vec<TrackedAction> {
        let mut all: Vec<TrackedAction> = self.actions.drain().map(|(_, a)| a).collect();
        all.sort_unstable_by_key(|a| a.actor);
        all
    }

    pub fn get(&self, actor: ActorId) -> Option<&TrackedAction> {
        self.actions.get(&actor)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn timeout_ticks(&self) -> u64 {
        self.timeout_ticks
    }

    /// Change the per-pass credit and idle limit.  Existing records keep
    /// their target ticks.
    pub fn set_timing(&mut self, interval: u64, timeout_ticks: u64) {
        self.interval = interval.max(1);
        self.timeout_ticks = timeout_ticks;
    }

    pub fn set_estimator(&mut self, estimator: DurationEstimator) {
        self.estimator = estimator;
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn step_one(&mut self, host: &dyn ActionHost, actor: ActorId, now: Tick) -> Option<StepOutcome> {
        let action = self.actions.get_mut(&actor)?;

        let exit: fn(TrackedAction) -> StepOutcome = if !host.actor_present(actor) {
            StepOutcome::Departed
        } else if !still_valid(host, action) {
            StepOutcome::Aborted
        } else if self.timeout_ticks > 0 && now.since(action.last_touch) > self.timeout_ticks {
            StepOutcome::TimedOut
        } else {
            action.accrued += self.interval;
            if !action.finished() {
                return Some(StepOutcome::Continue(action.stage()));
            }
            StepOutcome::Completed
        };

        let removed = self.actions.remove(&actor)?;
        debug!(%actor, target = %removed.target.id, accrued = removed.accrued, "action ended");
        Some(exit(removed))
    }
}

/// The actor still aims at the target holding the same tool category.
fn still_valid(host: &dyn ActionHost, action: &TrackedAction) -> bool {
    host.still_targets(action.actor, action.target.id)
        && host.held_tool(action.actor).is_some_and(|held| action.tool.same_tool(&held))
}
