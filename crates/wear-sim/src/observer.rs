//! Engine observer trait: the engine's only output channel.

use wear_action::ProgressStage;
use wear_core::{ActorId, TargetId, TargetInfo, Tick, ToolSnapshot};

/// Summary of one scheduler pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    pub tick:      Tick,
    pub pass:      u64,
    /// Signals applied from the inbox at the start of the pass.
    pub signals:   usize,
    /// Records still active after the pass.
    pub active:    usize,
    pub completed: usize,
    pub aborted:   usize,
    pub timed_out: usize,
    pub departed:  usize,
}

/// Callbacks invoked by the engine.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl EngineObserver for Printer {
///     fn finalize_action(&mut self, actor: ActorId, target: &TargetInfo, _tool: &ToolSnapshot) {
///         println!("{actor} finished {}", target.category);
///     }
/// }
/// ```
pub trait EngineObserver {
    /// The action completed; the host should perform the harvest now.
    /// Called exactly once per completed action.
    fn finalize_action(&mut self, _actor: ActorId, _target: &TargetInfo, _tool: &ToolSnapshot) {}

    /// Update (or clear) the progress overlay.  Repeated stages are filtered;
    /// `Clear` always arrives.
    fn set_progress_stage(&mut self, _actor: ActorId, _target: TargetId, _stage: ProgressStage) {}

    /// Called after every pass.
    fn on_pass_end(&mut self, _report: &PassReport) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
