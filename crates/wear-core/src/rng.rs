//! Deterministic, injected RNG for wear rollover and other stochastic rules.
//!
//! # Determinism strategy
//!
//! There is no process-wide random source.  The engine owns one `WearRng`
//! seeded from configuration and threads `&mut WearRng` through every call
//! that rolls dice, so a fixed seed reproduces a run exactly.  Tests build
//! their own with a literal seed.
//!
//! Child generators are derived with the golden-ratio mixing constant so
//! independent subsystems can hold their own stream without sharing state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seedable RNG wrapper used for all wear rolls.
///
/// Used only in single-threaded contexts (the scheduler pass or a wear event
/// handler).  The type is `!Sync`; give each thread its own via [`child`].
///
/// [`child`]: WearRng::child
pub struct WearRng(SmallRng);

impl WearRng {
    pub fn new(seed: u64) -> Self {
        WearRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `WearRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> WearRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        WearRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Uniform index in `0..n`; 0 when `n` is 0.
    #[inline]
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.0.gen_range(0..n)
    }

    /// `true` with probability `p` (clamped to [0, 1]; NaN counts as 0).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        if p.is_nan() {
            return false;
        }
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
