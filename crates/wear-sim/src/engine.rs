//! The `WearEngine` facade and its host-facing entry points.

use tracing::{debug, info};

use wear_action::{ActionHost, BeginOutcome};
use wear_core::{ActorId, Category, EquipSlot, ItemState, Percent, TargetId, TargetInfo, Tick, WearRng};
use wear_durability::{
    DegradationCurves, DurabilityService, FatigueEffect, MendingPolicy, TagSet, WearOutcome, WearRequest,
    WeatherWear,
};

use crate::{EngineObserver, EngineResult, PassReport, Signal, SignalInbox, TickScheduler, WearConfig};

/// Everything the host talks to.
///
/// The engine owns no host objects.  Host events come in as method calls (or
/// as [`Signal`]s through the [`SignalInbox`]); every visible effect goes out
/// through the [`EngineObserver`] passed to the call.
///
/// Nothing here fails at runtime: unknown actors, stale targets and
/// unsupported items degrade to a no-op or an identity result.  Only
/// [`reload`](WearEngine::reload) returns an error, and then the running
/// configuration is left untouched.
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct WearEngine {
    pub(crate) config:     WearConfig,
    pub(crate) scheduler:  TickScheduler,
    pub(crate) durability: DurabilityService,
    pub(crate) curves:     DegradationCurves,
    pub(crate) mending:    MendingPolicy,
    pub(crate) weather:    WeatherWear,
    pub(crate) rng:        WearRng,
    pub(crate) inbox:      SignalInbox,
    /// The strategy chain came from the builder, not the configuration.
    pub(crate) custom_estimator: bool,
}

impl WearEngine {
    // ── Accessors ─────────────────────────────────────────────────────────

    /// A handle for pushing signals from other threads.
    pub fn inbox(&self) -> SignalInbox {
        self.inbox.clone()
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.scheduler.now()
    }

    pub fn config(&self) -> &WearConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn durability(&self) -> &DurabilityService {
        &self.durability
    }

    pub fn curves(&self) -> &DegradationCurves {
        &self.curves
    }

    pub fn active_actions(&self) -> usize {
        self.scheduler.tracker().len()
    }

    /// `true` when harvesting is timed by the engine (delay mode, mining
    /// degradation on).
    pub fn tracks_actions(&self) -> bool {
        self.config.degradation.enabled && self.config.mining.enabled && self.curves.delays_actions()
    }

    // ── Tracked actions ───────────────────────────────────────────────────

    /// The actor started working `target` with `tool`.
    ///
    /// Returns `None` when the engine does not time harvesting or the tool is
    /// flagged broken; the host then keeps its own behaviour (or refuses the
    /// use, for broken tools).
    pub fn begin_action<O: EngineObserver>(
        &mut self,
        host:     &dyn ActionHost,
        actor:    ActorId,
        target:   TargetInfo,
        tool:     &ItemState,
        observer: &mut O,
    ) -> Option<BeginOutcome> {
        if !self.tracks_actions() {
            return None;
        }
        if !DurabilityService::is_usable(tool) {
            debug!(%actor, tool = %tool.category, "broken tool refused");
            return None;
        }
        let snapshot = tool.snapshot();
        let scale = self.curves.mining_delay_factor(&snapshot.category, snapshot.wear);
        Some(self.scheduler.begin(host, actor, target, snapshot, scale, observer))
    }

    /// The actor is still working its target; same as `begin_action`.
    pub fn reaffirm<O: EngineObserver>(
        &mut self,
        host:     &dyn ActionHost,
        actor:    ActorId,
        target:   TargetInfo,
        tool:     &ItemState,
        observer: &mut O,
    ) -> Option<BeginOutcome> {
        self.begin_action(host, actor, target, tool, observer)
    }

    /// The actor gave up; clears its overlay.
    pub fn cancel<O: EngineObserver>(&mut self, actor: ActorId, observer: &mut O) -> bool {
        self.scheduler.cancel(actor, observer)
    }

    /// `target` changed (harvested by someone else, replaced, moved).
    pub fn target_changed<O: EngineObserver>(&mut self, target: TargetId, observer: &mut O) -> usize {
        self.scheduler.abort_target(target, observer)
    }

    /// Drop every record of an actor that left the world.  Its overlay is
    /// cleared for anyone still watching the target.
    pub fn actor_left<O: EngineObserver>(&mut self, actor: ActorId, observer: &mut O) -> bool {
        self.durability.forget_actor(actor);
        self.scheduler.forget_actor(actor, observer)
    }

    /// Run one scheduler pass: apply queued signals, then step every action.
    pub fn tick_pulse<O: EngineObserver>(&mut self, host: &dyn ActionHost, observer: &mut O) -> PassReport {
        let signals = self.apply_signals(host, observer);
        let mut report = self.scheduler.run_pass(host, observer);
        report.signals = signals;
        observer.on_pass_end(&report);
        report
    }

    // ── Wear ──────────────────────────────────────────────────────────────

    /// Decide the wear for one event on `item`; see [`DurabilityService::wear_event`].
    pub fn wear_event<T: TagSet + ?Sized>(
        &mut self,
        actor:   ActorId,
        tags:    &T,
        context: Option<&str>,
        item:    &ItemState,
        base:    u32,
    ) -> WearOutcome {
        let req = WearRequest { actor, tags, context, base, now: self.now() };
        self.durability.wear_event(&req, item, &mut self.rng)
    }

    pub fn note_block_break(&mut self, actor: ActorId, tool: &Category, target: &TargetInfo) {
        self.durability.note_block_break(actor, tool, target);
    }

    pub fn note_hit(&mut self, actor: ActorId, weapon: &Category) {
        self.durability.note_hit(actor, weapon);
    }

    pub fn set_alert_opt_out(&mut self, actor: ActorId, opted_out: bool) {
        self.durability.set_alert_opt_out(actor, opted_out);
    }

    /// Remove `amount` points, honouring auto-protect.
    pub fn take_durability(&self, item: &mut ItemState, amount: u32) {
        self.durability.take_durability(item, amount);
    }

    #[inline]
    pub fn is_usable(&self, item: &ItemState) -> bool {
        DurabilityService::is_usable(item)
    }

    /// Interpret a host wear reading in the configured unit.
    pub fn read_percent(&self, value: f64) -> Percent {
        Percent::from_reading(value, self.config.percent_unit)
    }

    // ── Degradation ───────────────────────────────────────────────────────

    pub fn weapon_factor(&self, weapon: &ItemState) -> f64 {
        self.curves.weapon_factor(weapon)
    }

    pub fn armor_factor(&self, pieces: &[ItemState]) -> f64 {
        self.curves.armor_factor(pieces)
    }

    /// Fatigue to apply after harvesting with `tool`; effect mode only.
    pub fn fatigue(&self, tool: &ItemState) -> Option<FatigueEffect> {
        if !self.config.degradation.enabled {
            return None;
        }
        self.curves.fatigue(&tool.category, tool.remaining_percent())
    }

    // ── Mending & weather ─────────────────────────────────────────────────

    /// Points a repair of `amount` restores on `category`; `None` cancels it.
    pub fn mend(&self, category: &Category, amount: u32) -> Option<u32> {
        self.mending.mend(category, amount)
    }

    pub fn repairable(&self, category: &Category) -> bool {
        self.mending.repairable(category)
    }

    /// `true` when a storm wear pass is due at the current tick.
    pub fn weather_pulse(&mut self) -> bool {
        let now = self.now();
        self.weather.due(now)
    }

    /// Apply one storm pass to an exposed actor's equipment.
    pub fn weather_wear<'a>(&self, equipment: impl IntoIterator<Item = (EquipSlot, &'a mut ItemState)>) -> usize {
        self.weather.wear_pass(equipment)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Replace the configuration wholesale.
    ///
    /// The new configuration is validated and every component built before
    /// anything is swapped; on error the engine keeps running unchanged.
    /// On success every tracked action is cleared and per-actor wear state is
    /// reset.  The clock keeps running.  A strategy chain installed through
    /// [`EngineBuilder::estimator`][crate::EngineBuilder::estimator] is kept;
    /// otherwise the estimator is rebuilt from the new configuration.
    pub fn reload<O: EngineObserver>(&mut self, config: WearConfig, observer: &mut O) -> EngineResult<()> {
        config.validate()?;
        let estimator = if self.custom_estimator { None } else { Some(config.estimator()?) };
        let durability = DurabilityService::new(config.resolver(), config.policy()).with_salvage(config.salvage_policy());
        let curves = config.degradation();
        let mending = config.mending_policy();
        let weather = config.weather_wear();

        self.scheduler.reconfigure(
            estimator,
            config.scheduler.interval_ticks,
            config.timeout_ticks(),
            observer,
        );
        self.durability = durability;
        self.curves = curves;
        self.mending = mending;
        self.weather = weather;
        self.config = config;
        info!(
            tick = %self.now(),
            tiers = self.config.bonus_tiers.len(),
            mode = ?self.curves.mode,
            "wear configuration reloaded"
        );
        Ok(())
    }

    /// Clear every overlay and drop every tracked action; returns how many.
    pub fn shutdown<O: EngineObserver>(&mut self, observer: &mut O) -> usize {
        let pending = self.inbox.drain().len();
        let cleared = self.scheduler.shutdown(observer);
        info!(tick = %self.now(), cleared, discarded_signals = pending, "wear engine shut down");
        cleared
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn apply_signals<O: EngineObserver>(&mut self, host: &dyn ActionHost, observer: &mut O) -> usize {
        let signals = self.inbox.drain();
        let n = signals.len();
        for signal in signals {
            match signal {
                Signal::Begin { actor, target, tool } => {
                    self.begin_action(host, actor, target, &tool, observer);
                }
                Signal::Cancel(actor) => {
                    self.cancel(actor, observer);
                }
                Signal::TargetChanged(target) => {
                    self.target_changed(target, observer);
                }
                Signal::ActorLeft(actor) => {
                    self.actor_left(actor, observer);
                }
            }
        }
        n
    }
}
