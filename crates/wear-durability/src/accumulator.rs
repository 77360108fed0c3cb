//! Expectation-preserving conversion of fractional wear to whole points.
//!
//! Wear is stored in integer points, but multipliers are real numbers.
//! Rounding `base × factor` would let small multipliers (e.g. 0.3) round to
//! zero forever.  Instead the integer part is always applied and the
//! fractional remainder is applied as one extra point with probability equal
//! to the remainder:
//!
//! ```text
//! expected = base × factor
//! out      = ⌊expected⌋ + Bernoulli(expected − ⌊expected⌋)
//! E[out]   = expected
//! ```

use wear_core::WearRng;

/// Stateless rounding helper; see module docs.
pub struct WearAccumulator;

impl WearAccumulator {
    /// Integer wear for `base` points scaled by `factor`.
    ///
    /// Returns 0 for `factor ≤ 0`, NaN, or `base == 0` without touching the
    /// RNG.  Very large products saturate at `u32::MAX`.
    pub fn apply(base: u32, factor: f64, rng: &mut WearRng) -> u32 {
        if base == 0 || !(factor > 0.0) {
            return 0;
        }
        let expected = (base as f64 * factor).min(u32::MAX as f64);
        let whole = expected.floor();
        let frac = expected - whole;

        let mut out = whole as u32;
        if frac > 0.0 && rng.unit() < frac {
            out = out.saturating_add(1);
        }
        out
    }
}
