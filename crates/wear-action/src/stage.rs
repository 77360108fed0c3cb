//! `StageCache`: drop stage updates the host has already seen.

use wear_core::{ActorId, TargetId};

use crate::{ActorMap, ProgressStage};

/// Last stage delivered per `(actor, target)`.
///
/// `Clear` is always delivered and forgets the entry, so a later stage on
/// the same target is sent again.
#[derive(Default)]
pub struct StageCache {
    last: ActorMap<(ActorId, TargetId), u8>,
}

impl StageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if `stage` should be forwarded to the host.
    pub fn admit(&mut self, actor: ActorId, target: TargetId, stage: ProgressStage) -> bool {
        match stage {
            ProgressStage::Clear => {
                self.last.remove(&(actor, target));
                true
            }
            ProgressStage::Stage(s) => self.last.insert((actor, target), s) != Some(s),
        }
    }

    /// Forget everything cached for `actor`.
    pub fn forget_actor(&mut self, actor: ActorId) {
        self.last.retain(|(a, _), _| *a != actor);
    }

    pub fn clear(&mut self) {
        self.last.clear();
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}
