//! Per-actor tracked action state.

use std::fmt;

use wear_core::{ActorId, Category, TargetId, TargetInfo, Tick, ToolSnapshot};

/// Highest visible progress stage.
pub const MAX_STAGE: u8 = 9;

/// Progress overlay update sent to the host.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ProgressStage {
    /// `0..=9`.
    Stage(u8),
    /// Remove the overlay.
    Clear,
}

impl fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressStage::Stage(s) => write!(f, "stage {s}"),
            ProgressStage::Clear => f.write_str("clear"),
        }
    }
}

/// One in-progress action.
///
/// The tool is frozen at begin time: its wear at that moment fixes
/// `target_ticks` even if the tool wears further while the action runs.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedAction {
    pub actor:        ActorId,
    pub target:       TargetInfo,
    pub tool:         ToolSnapshot,
    /// Ticks of work needed, at least 2.
    pub target_ticks: u64,
    pub accrued:      u64,
    pub started:      Tick,
    /// Last begin / reaffirm; drives the idle timeout.
    pub last_touch:   Tick,
}

impl TrackedAction {
    /// `min(9, ⌊10 × accrued / target_ticks⌋)`.
    pub fn stage(&self) -> u8 {
        let stage = 10 * self.accrued / self.target_ticks.max(1);
        stage.min(MAX_STAGE as u64) as u8
    }

    #[inline]
    pub fn finished(&self) -> bool {
        self.accrued >= self.target_ticks
    }

    /// Same target and same tool category.
    #[inline]
    pub fn same_target(&self, target: TargetId, tool: &Category) -> bool {
        self.target.id == target && self.tool.same_tool(tool)
    }

    /// Fraction of the work done, in `[0.0, 1.0]`.
    pub fn progress(&self) -> f32 {
        (self.accrued as f32 / self.target_ticks.max(1) as f32).min(1.0)
    }
}
