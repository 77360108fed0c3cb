//! `TickScheduler`: the fixed-period driver of every tracked action.

use tracing::{info, trace};

use wear_action::{ActionHost, ActionTracker, BeginOutcome, DurationEstimator, ProgressStage, StageCache, StepOutcome};
use wear_core::{ActorId, SchedulerClock, TargetId, TargetInfo, Tick, ToolSnapshot};

use crate::{EngineObserver, PassReport};

/// Owns the clock, the tracked actions and the stage filter.
///
/// Every stage update and finalize goes out through the observer passed to
/// the call that caused it; the scheduler keeps no reference to the host.
pub struct TickScheduler {
    clock:   SchedulerClock,
    tracker: ActionTracker,
    stages:  StageCache,
}

impl TickScheduler {
    pub fn new(tracker: ActionTracker) -> Self {
        Self {
            clock: SchedulerClock::new(tracker.interval()),
            tracker,
            stages: StageCache::new(),
        }
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn clock(&self) -> &SchedulerClock {
        &self.clock
    }

    pub fn tracker(&self) -> &ActionTracker {
        &self.tracker
    }

    // ── Record lifecycle ──────────────────────────────────────────────────

    /// Start or refresh an action and show stage 0 on its target.
    #[allow(clippy::too_many_arguments)]
    pub fn begin<O: EngineObserver>(
        &mut self,
        host:     &dyn ActionHost,
        actor:    ActorId,
        target:   TargetInfo,
        tool:     ToolSnapshot,
        scale:    f64,
        observer: &mut O,
    ) -> BeginOutcome {
        let target_id = target.id;
        let now = self.now();
        let outcome = self.tracker.begin(host, actor, target, tool, scale, now);
        if let BeginOutcome::Replaced(old) = &outcome {
            self.emit(observer, actor, old.target.id, ProgressStage::Clear);
        }
        self.emit(observer, actor, target_id, ProgressStage::Stage(0));
        outcome
    }

    /// Abort the action of `actor`; `true` if there was one.
    pub fn cancel<O: EngineObserver>(&mut self, actor: ActorId, observer: &mut O) -> bool {
        match self.tracker.cancel(actor) {
            Some(action) => {
                self.emit(observer, actor, action.target.id, ProgressStage::Clear);
                true
            }
            None => false,
        }
    }

    /// Abort every action on `target`; returns how many.
    pub fn abort_target<O: EngineObserver>(&mut self, target: TargetId, observer: &mut O) -> usize {
        let aborted = self.tracker.abort_target(target);
        for action in &aborted {
            self.emit(observer, action.actor, target, ProgressStage::Clear);
        }
        aborted.len()
    }

    /// The actor left: abort its action like [`cancel`](Self::cancel) and
    /// drop everything cached for it.
    pub fn forget_actor<O: EngineObserver>(&mut self, actor: ActorId, observer: &mut O) -> bool {
        let had = self.cancel(actor, observer);
        self.stages.forget_actor(actor);
        had
    }

    // ── Passes ────────────────────────────────────────────────────────────

    /// Advance the clock by one interval and step every record once.
    ///
    /// The caller fills in `signals` and reports the pass to the observer.
    pub fn run_pass<O: EngineObserver>(&mut self, host: &dyn ActionHost, observer: &mut O) -> PassReport {
        let now = self.clock.advance();
        let mut report = PassReport { tick: now, pass: self.clock.passes, ..PassReport::default() };

        if !self.tracker.is_empty() {
            for step in self.tracker.step_all(host, now) {
                match step.outcome {
                    StepOutcome::Continue(stage) => {
                        self.emit(observer, step.actor, step.target, ProgressStage::Stage(stage));
                    }
                    StepOutcome::Completed(action) => {
                        self.emit(observer, step.actor, step.target, ProgressStage::Clear);
                        observer.finalize_action(step.actor, &action.target, &action.tool);
                        report.completed += 1;
                    }
                    StepOutcome::Aborted(_) => {
                        self.emit(observer, step.actor, step.target, ProgressStage::Clear);
                        report.aborted += 1;
                    }
                    StepOutcome::TimedOut(_) => {
                        self.emit(observer, step.actor, step.target, ProgressStage::Clear);
                        report.timed_out += 1;
                    }
                    StepOutcome::Departed(_) => {
                        self.emit(observer, step.actor, step.target, ProgressStage::Clear);
                        self.stages.forget_actor(step.actor);
                        report.departed += 1;
                    }
                }
            }
        }

        report.active = self.tracker.len();
        report
    }

    /// Clear every overlay and drop every record.
    pub fn shutdown<O: EngineObserver>(&mut self, observer: &mut O) -> usize {
        let drained = self.tracker.drain_all();
        for action in &drained {
            self.emit(observer, action.actor, action.target.id, ProgressStage::Clear);
        }
        self.stages.clear();
        if !drained.is_empty() {
            info!(cleared = drained.len(), "tracked actions cleared");
        }
        drained.len()
    }

    /// Clear every record and apply new timing.  The estimator is replaced
    /// only when one is given.
    pub fn reconfigure<O: EngineObserver>(
        &mut self,
        estimator:     Option<DurationEstimator>,
        interval:      u64,
        timeout_ticks: u64,
        observer:      &mut O,
    ) {
        self.shutdown(observer);
        self.tracker.set_timing(interval, timeout_ticks);
        if let Some(estimator) = estimator {
            self.tracker.set_estimator(estimator);
        }
        self.clock.interval = self.tracker.interval();
    }

    fn emit<O: EngineObserver>(&mut self, observer: &mut O, actor: ActorId, target: TargetId, stage: ProgressStage) {
        if self.stages.admit(actor, target, stage) {
            trace!(%actor, %target, %stage, "progress stage");
            observer.set_progress_stage(actor, target, stage);
        }
    }
}
