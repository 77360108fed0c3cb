//! `DurabilityService`: turns wear events into integer wear decisions.
//!
//! The service never touches the host's items.  It reads an [`ItemState`]
//! snapshot and returns a [`WearOutcome`]; the host (or
//! [`WearOutcome::apply_to`]) writes the decision back.
//!
//! # Per-actor state
//!
//! | Map           | Lifetime                                           |
//! |---------------|----------------------------------------------------|
//! | wrong-tool    | set by `note_*`, consumed by the next `wear_event` |
//! | alert history | last low-durability alert tick, for the cooldown   |
//! | alert opt-out | until toggled back                                 |
//!
//! All three are dropped by [`DurabilityService::forget_actor`].

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};
use wear_core::{ActorId, Category, ItemState, Percent, TargetInfo, Tick, WearRng};

use crate::{MultiplierResolver, SalvagePolicy, TagSet, WearAccumulator};

// ── Policy ────────────────────────────────────────────────────────────────────

/// Low-durability alert settings.
#[derive(Clone, Debug, PartialEq)]
pub struct LowAlertPolicy {
    /// Alert when remaining health is at or below this.
    pub threshold:      Percent,
    pub cooldown_ticks: u64,
}

impl Default for LowAlertPolicy {
    fn default() -> Self {
        Self {
            threshold:      Percent::new(5),
            cooldown_ticks: 10 * wear_core::TICKS_PER_SECOND as u64,
        }
    }
}

/// Switches and penalty factors for wear events.
#[derive(Clone, Debug, PartialEq)]
pub struct WearPolicy {
    /// When `false`, armour categories never receive scaled wear.
    pub include_armor:      bool,
    /// Factor for wear right after breaking a target with the wrong tool class.
    pub wrong_tool_blocks:  Option<f64>,
    /// Factor for wear right after a hit with a non-weapon.
    pub wrong_tool_combat:  Option<f64>,
    /// Whether axes count as weapons for the combat penalty.
    pub axe_is_weapon:      bool,
    /// Hold items at their last point instead of letting them break.
    pub auto_protect:       bool,
    pub low_alert:          Option<LowAlertPolicy>,
}

impl Default for WearPolicy {
    fn default() -> Self {
        Self {
            include_armor:     true,
            wrong_tool_blocks: None,
            wrong_tool_combat: None,
            axe_is_weapon:     true,
            auto_protect:      false,
            low_alert:         Some(LowAlertPolicy::default()),
        }
    }
}

// ── Request / outcome ─────────────────────────────────────────────────────────

/// One wear event as reported by the host.
pub struct WearRequest<'a, T: TagSet + ?Sized> {
    pub actor:   ActorId,
    pub tags:    &'a T,
    /// Zone / world the actor is in.
    pub context: Option<&'a str>,
    /// Unscaled wear the host was about to apply.
    pub base:    u32,
    /// Scheduler tick, used for the alert cooldown.
    pub now:     Tick,
}

/// Decision for one wear event.
///
/// `salvage` lists the materials the host should drop for an item that is
/// used up (or held by auto-protect, when configured).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WearOutcome {
    /// The item does not take part (no wear budget, or excluded armour).
    /// The host keeps its own behaviour.
    Skipped,
    /// No wear this time.
    Negated,
    /// Wear would have destroyed the item; hold it at one point and flag it
    /// broken instead.
    Protected {
        salvage: Vec<Category>,
    },
    Applied {
        delta:     u32,
        /// The item is used up by this wear.
        breaks:    bool,
        /// The host should show a low-durability warning.
        low_alert: bool,
        salvage:   Vec<Category>,
    },
}

impl WearOutcome {
    /// Wear points the host should apply (0 for everything but `Applied`).
    pub fn delta(&self) -> u32 {
        match self {
            WearOutcome::Applied { delta, .. } => *delta,
            _ => 0,
        }
    }

    /// Materials to drop; empty unless the item broke (or was protected).
    pub fn salvage(&self) -> &[Category] {
        match self {
            WearOutcome::Protected { salvage } | WearOutcome::Applied { salvage, .. } => salvage,
            WearOutcome::Skipped | WearOutcome::Negated => &[],
        }
    }

    /// Write the decision into `item`.
    pub fn apply_to(&self, item: &mut ItemState) {
        match *self {
            WearOutcome::Skipped | WearOutcome::Negated => {}
            WearOutcome::Protected { .. } => {
                item.damage = item.max_wear.saturating_sub(1);
                item.broken = true;
            }
            WearOutcome::Applied { delta, .. } => {
                item.damage = item.damage.saturating_add(delta).min(item.max_wear);
            }
        }
    }
}

// ── Wrong-tool marks ──────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default)]
struct WrongToolMarks {
    block:  bool,
    combat: bool,
}

// ── DurabilityService ─────────────────────────────────────────────────────────

pub struct DurabilityService {
    resolver:   MultiplierResolver,
    policy:     WearPolicy,
    salvage:    SalvagePolicy,
    marks:      HashMap<ActorId, WrongToolMarks>,
    last_alert: HashMap<ActorId, Tick>,
    opted_out:  HashSet<ActorId>,
}

impl DurabilityService {
    pub fn new(resolver: MultiplierResolver, policy: WearPolicy) -> Self {
        Self {
            resolver,
            policy,
            salvage:    SalvagePolicy::default(),
            marks:      HashMap::new(),
            last_alert: HashMap::new(),
            opted_out:  HashSet::new(),
        }
    }

    pub fn with_salvage(mut self, salvage: SalvagePolicy) -> Self {
        self.salvage = salvage;
        self
    }

    pub fn resolver(&self) -> &MultiplierResolver {
        &self.resolver
    }

    pub fn policy(&self) -> &WearPolicy {
        &self.policy
    }

    pub fn salvage(&self) -> &SalvagePolicy {
        &self.salvage
    }

    // ── Wrong-tool marks ──────────────────────────────────────────────────

    /// Record that `actor` broke `target` with `tool`.  Marks the actor when
    /// the target has a designation the tool does not fit.
    pub fn note_block_break(&mut self, actor: ActorId, tool: &Category, target: &TargetInfo) {
        if self.policy.wrong_tool_blocks.is_none() || target.designation.is_none() {
            return;
        }
        if !target.accepts(tool) {
            debug!(%actor, %tool, target = %target.category, "wrong tool for target");
            self.marks.entry(actor).or_default().block = true;
        }
    }

    /// Record that `actor` hit something with `weapon`.  Marks the actor
    /// when it is not a weapon.
    pub fn note_hit(&mut self, actor: ActorId, weapon: &Category) {
        if self.policy.wrong_tool_combat.is_none() {
            return;
        }
        if !weapon.is_weapon(self.policy.axe_is_weapon) {
            debug!(%actor, %weapon, "non-weapon used in combat");
            self.marks.entry(actor).or_default().combat = true;
        }
    }

    // ── Wear events ───────────────────────────────────────────────────────

    /// Decide the wear for one event on `item`.
    ///
    /// Pending wrong-tool marks for the actor are consumed even when the
    /// outcome is `Negated`.  Salvage is rolled on `rng` after the wear roll.
    pub fn wear_event<T: TagSet + ?Sized>(
        &mut self,
        req:  &WearRequest<'_, T>,
        item: &ItemState,
        rng:  &mut WearRng,
    ) -> WearOutcome {
        if !item.supports_wear() || (!self.policy.include_armor && item.category.is_armor()) {
            return WearOutcome::Skipped;
        }

        let mut factor = self.resolver.resolve(req.tags, &item.category, req.context);
        factor *= self.consume_marks(req.actor);
        if !(factor > 0.0) {
            return WearOutcome::Negated;
        }

        let delta = WearAccumulator::apply(req.base, factor, rng);
        if delta == 0 {
            return WearOutcome::Negated;
        }

        if item.would_break(delta) {
            if self.policy.auto_protect {
                debug!(actor = %req.actor, category = %item.category, "auto-protect held item at last point");
                let salvage = if self.salvage.also_on_auto_protect { self.salvage.roll(item, rng) } else { Vec::new() };
                return WearOutcome::Protected { salvage };
            }
            let salvage = self.salvage.roll(item, rng);
            return WearOutcome::Applied { delta, breaks: true, low_alert: false, salvage };
        }

        let remaining = Percent::of_remaining(item.remaining() - delta, item.max_wear);
        let low_alert = self.low_alert_due(req.actor, remaining, req.now);
        trace!(actor = %req.actor, category = %item.category, factor, delta, %remaining, "wear applied");
        WearOutcome::Applied { delta, breaks: false, low_alert, salvage: Vec::new() }
    }

    /// `false` for items flagged broken by auto-protect; hosts refuse the use.
    #[inline]
    pub fn is_usable(item: &ItemState) -> bool {
        !item.broken
    }

    // ── Alerts ────────────────────────────────────────────────────────────

    pub fn set_alert_opt_out(&mut self, actor: ActorId, opted_out: bool) {
        if opted_out {
            self.opted_out.insert(actor);
        } else {
            self.opted_out.remove(&actor);
        }
    }

    pub fn alerts_enabled_for(&self, actor: ActorId) -> bool {
        self.policy.low_alert.is_some() && !self.opted_out.contains(&actor)
    }

    /// Drop every per-actor record (actor left the world).
    pub fn forget_actor(&mut self, actor: ActorId) {
        self.marks.remove(&actor);
        self.last_alert.remove(&actor);
        self.opted_out.remove(&actor);
    }

    // ── Command helpers ───────────────────────────────────────────────────

    /// Fully restore `item` and clear the broken flag.
    pub fn repair(item: &mut ItemState) {
        item.damage = 0;
        item.broken = false;
    }

    /// Restore `amount` points.
    pub fn add_durability(item: &mut ItemState, amount: u32) {
        item.damage = item.damage.saturating_sub(amount);
        item.broken = false;
    }

    /// Remove `amount` points.  With auto-protect on, the item stops at its
    /// last point and is flagged broken.
    pub fn take_durability(&self, item: &mut ItemState, amount: u32) {
        if !item.supports_wear() {
            return;
        }
        if self.policy.auto_protect && item.would_break(amount) {
            item.damage = item.max_wear - 1;
            item.broken = true;
        } else {
            item.damage = item.damage.saturating_add(amount).min(item.max_wear);
        }
    }

    /// Set remaining points to `remaining` (clamped to the wear budget).
    pub fn set_remaining(item: &mut ItemState, remaining: u32) {
        item.damage = item.max_wear - remaining.min(item.max_wear);
        item.broken = false;
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn consume_marks(&mut self, actor: ActorId) -> f64 {
        let Some(marks) = self.marks.remove(&actor) else {
            return 1.0;
        };
        let mut factor = 1.0;
        if marks.block {
            factor *= self.policy.wrong_tool_blocks.unwrap_or(1.0);
        }
        if marks.combat {
            factor *= self.policy.wrong_tool_combat.unwrap_or(1.0);
        }
        factor
    }

    fn low_alert_due(&mut self, actor: ActorId, remaining: Percent, now: Tick) -> bool {
        let Some(alert) = &self.policy.low_alert else {
            return false;
        };
        if remaining > alert.threshold || self.opted_out.contains(&actor) {
            return false;
        }
        if let Some(&last) = self.last_alert.get(&actor) {
            if now.since(last) < alert.cooldown_ticks {
                return false;
            }
        }
        self.last_alert.insert(actor, now);
        true
    }
}
