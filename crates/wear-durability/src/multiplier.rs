//! `MultiplierResolver`: the wear multiplier for an actor + category pair.
//!
//! # Stages
//!
//! Strictly multiplicative; every unconfigured stage is the identity.
//!
//! 1. **Base**: the global default multiplier.
//! 2. **Category**: special categories (e.g. `ELYTRA`) first swap in their
//!    own default; a category override (exact or prefix family) then
//!    *replaces* the base.
//! 3. **Context**: multiply by the factor configured for the actor's
//!    current zone / world, if any.
//! 4. **Bonus tier**: multiply by the factor of the first tier, in declared
//!    order, whose tag the actor holds.  Later tiers are not consulted.
//!
//! A result `≤ 0` tells callers "never apply wear"; it is not clamped here.

use std::collections::{BTreeSet, HashMap, HashSet};

use wear_core::Category;
use wear_curve::CategoryMatcher;

// ── TagSet ────────────────────────────────────────────────────────────────────

/// Something that can answer "does the actor hold this tag?".
///
/// Hosts typically back this with their permission system; the core only
/// needs the yes/no answer.
pub trait TagSet {
    fn holds(&self, tag: &str) -> bool;
}

/// An actor holding no tags.
pub struct NoTags;

impl TagSet for NoTags {
    #[inline]
    fn holds(&self, _tag: &str) -> bool {
        false
    }
}

impl TagSet for [&str] {
    fn holds(&self, tag: &str) -> bool {
        self.iter().any(|t| *t == tag)
    }
}

impl TagSet for [String] {
    fn holds(&self, tag: &str) -> bool {
        self.iter().any(|t| t == tag)
    }
}

impl TagSet for HashSet<String> {
    fn holds(&self, tag: &str) -> bool {
        self.contains(tag)
    }
}

impl TagSet for BTreeSet<String> {
    fn holds(&self, tag: &str) -> bool {
        self.contains(tag)
    }
}

impl TagSet for Vec<String> {
    fn holds(&self, tag: &str) -> bool {
        self.as_slice().holds(tag)
    }
}

// ── BonusTier ─────────────────────────────────────────────────────────────────

/// A tag-gated multiplicative bonus.
#[derive(Clone, Debug, PartialEq)]
pub struct BonusTier {
    pub tag:    String,
    pub factor: f64,
}

impl BonusTier {
    pub fn new(tag: impl Into<String>, factor: f64) -> Self {
        Self { tag: tag.into(), factor }
    }
}

// ── MultiplierBreakdown ───────────────────────────────────────────────────────

/// Per-stage factors of one resolution, for diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiplierBreakdown {
    /// Base after the category stage.
    pub base:    f64,
    pub context: f64,
    pub bonus:   f64,
    /// Tag of the tier that matched, if any.
    pub tier:    Option<String>,
}

impl MultiplierBreakdown {
    #[inline]
    pub fn total(&self) -> f64 {
        self.base * self.context * self.bonus
    }
}

// ── MultiplierResolver ────────────────────────────────────────────────────────

/// Composes the wear multiplier (see module docs).
///
/// Pure: a function of its configuration and the call arguments only.
#[derive(Clone, Debug)]
pub struct MultiplierResolver {
    global:           f64,
    special_defaults: HashMap<Category, f64>,
    categories:       CategoryMatcher<f64>,
    contexts:         HashMap<String, f64>,
    /// Evaluated in order; first held tag wins.
    tiers:            Vec<BonusTier>,
}

impl Default for MultiplierResolver {
    /// The identity resolver: every resolution yields exactly 1.0.
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl MultiplierResolver {
    pub fn new(global: f64) -> Self {
        Self {
            global,
            special_defaults: HashMap::new(),
            categories:       CategoryMatcher::new(),
            contexts:         HashMap::new(),
            tiers:            Vec::new(),
        }
    }

    /// Substitute `default` for the global base when resolving `category`.
    pub fn with_special_default(mut self, category: impl Into<Category>, default: f64) -> Self {
        self.special_defaults.insert(category.into(), default);
        self
    }

    pub fn with_categories(mut self, categories: CategoryMatcher<f64>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>, factor: f64) -> Self {
        self.contexts.insert(context.into(), factor);
        self
    }

    /// Replace the tier list; order is evaluation priority.
    pub fn with_tiers(mut self, tiers: Vec<BonusTier>) -> Self {
        self.tiers = tiers;
        self
    }

    /// Final multiplier for `category` used by an actor holding `tags` in
    /// `context`.
    #[inline]
    pub fn resolve<T: TagSet + ?Sized>(
        &self,
        tags:     &T,
        category: &Category,
        context:  Option<&str>,
    ) -> f64 {
        self.breakdown(tags, category, context).total()
    }

    /// Like [`resolve`][Self::resolve] but keeps every stage's factor.
    pub fn breakdown<T: TagSet + ?Sized>(
        &self,
        tags:     &T,
        category: &Category,
        context:  Option<&str>,
    ) -> MultiplierBreakdown {
        // ── Stages 1–2: base, special default, category override ──────────
        let default = self.special_defaults.get(category).copied().unwrap_or(self.global);
        let base = *self.categories.find_or(category, &default);

        // ── Stage 3: context ──────────────────────────────────────────────
        let context = context
            .and_then(|c| self.contexts.get(c))
            .copied()
            .unwrap_or(1.0);

        // ── Stage 4: first held tier ──────────────────────────────────────
        let tier = self.tiers.iter().find(|t| tags.holds(&t.tag));

        MultiplierBreakdown {
            base,
            context,
            bonus: tier.map_or(1.0, |t| t.factor),
            tier:  tier.map(|t| t.tag.clone()),
        }
    }

    pub fn tiers(&self) -> &[BonusTier] {
        &self.tiers
    }
}
