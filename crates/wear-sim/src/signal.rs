//! `SignalInbox`: hand-off point for host events raised between passes.
//!
//! Hosts whose event handlers run on other threads push [`Signal`]s here;
//! the engine drains the inbox at the start of every pass, so tracked
//! actions are only ever mutated inside a pass.

use std::sync::Arc;

use parking_lot::Mutex;

use wear_core::{ActorId, ItemState, TargetId, TargetInfo};

/// One deferred host event.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    /// The actor started (or kept) working `target` with `tool`.
    Begin { actor: ActorId, target: TargetInfo, tool: ItemState },
    /// The actor stopped, switched items, or otherwise gave up.
    Cancel(ActorId),
    /// The target changed under whoever was working it.
    TargetChanged(TargetId),
    /// The actor left the world.
    ActorLeft(ActorId),
}

/// Cloneable, thread-safe signal queue.
#[derive(Clone, Default)]
pub struct SignalInbox {
    queue: Arc<Mutex<Vec<Signal>>>,
}

impl SignalInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, signal: Signal) {
        self.queue.lock().push(signal);
    }

    /// Take every queued signal, oldest first.
    pub fn drain(&self) -> Vec<Signal> {
        std::mem::take(&mut *self.queue.lock())
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}
