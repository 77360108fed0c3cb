//! Scheduler time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter owned by the
//! `SchedulerClock`.  The host runs at [`TICKS_PER_SECOND`] simulation ticks
//! per second; the scheduler is invoked every `interval` ticks and bumps the
//! clock by that amount each pass:
//!
//!   now = passes * interval
//!
//! The clock is only used for relative comparisons (timeouts).  It never
//! maps to wall-clock time, so no datetime library is involved.

use std::fmt;

/// Simulation ticks per simulated second (the host's fixed tick rate).
pub const TICKS_PER_SECOND: u32 = 20;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute scheduler tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SchedulerClock ────────────────────────────────────────────────────────────

/// The fixed-interval clock advanced once per scheduler pass.
///
/// `SchedulerClock` is cheap to copy and holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerClock {
    /// Host ticks between two scheduler passes.  Default: 2.
    pub interval: u64,
    /// The current tick: advanced by `SchedulerClock::advance()` each pass.
    pub current_tick: Tick,
    /// Number of passes run so far.
    pub passes: u64,
}

impl SchedulerClock {
    /// Create a clock at tick 0 advancing by `interval` per pass.
    ///
    /// An interval of 0 would freeze every tracked action; it is clamped to 1.
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            current_tick: Tick::ZERO,
            passes: 0,
        }
    }

    /// Advance the clock by one pass and return the new current tick.
    #[inline]
    pub fn advance(&mut self) -> Tick {
        self.current_tick = self.current_tick.offset(self.interval);
        self.passes += 1;
        self.current_tick
    }

    /// How many host ticks span `secs` simulated seconds.
    #[inline]
    pub fn ticks_for_secs(secs: u64) -> u64 {
        secs.saturating_mul(TICKS_PER_SECOND as u64)
    }

    /// Elapsed simulated seconds since tick 0 (truncating).
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.current_tick.0 / TICKS_PER_SECOND as u64
    }
}

impl Default for SchedulerClock {
    fn default() -> Self {
        Self::new(2)
    }
}

impl fmt::Display for SchedulerClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (pass {}, {}s)", self.current_tick, self.passes, self.elapsed_secs())
    }
}
