//! Coalescing queue of dirty relayout roots.

use indexmap::IndexSet;
use smallvec::SmallVec;
use stagekit_core::NodeId;

use crate::host::NegotiationHost;

/// Scene-lifetime collection of actors whose subtrees need renegotiation.
///
/// Owned by the stage and only ever touched from the update tick.
#[derive(Debug, Default)]
pub struct RelayoutRequestQueue {
    pending: IndexSet<NodeId>,
}

impl RelayoutRequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `id` as a candidate dirty root for the next flush.
    /// Idempotent; returns true if the actor was newly queued.
    pub fn request(&mut self, id: NodeId) -> bool {
        self.pending.insert(id)
    }

    /// Drops a pending request, if any. Called when the actor is destroyed.
    pub fn cancel(&mut self, id: NodeId) {
        self.pending.shift_remove(&id);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.pending.contains(&id)
    }

    /// Takes the whole pending set for one flush. Requests raised while the
    /// flush runs land in the emptied queue and are processed next frame,
    /// which is what bounds a pass even when size callbacks re-request.
    pub fn take_pending(&mut self) -> IndexSet<NodeId> {
        std::mem::take(&mut self.pending)
    }
}

/// Drops every queued actor that is a strict descendant of another queued
/// actor; the ancestor's walk covers it. Duplicate requests were already
/// collapsed by the set. Queue order is preserved for the survivors.
pub fn coalesce_roots<H: NegotiationHost>(
    host: &H,
    pending: &IndexSet<NodeId>,
) -> SmallVec<[NodeId; 4]> {
    let mut roots = SmallVec::new();
    'candidates: for &id in pending {
        let mut ancestor = host.parent(id);
        while let Some(above) = ancestor {
            if pending.contains(&above) {
                continue 'candidates;
            }
            ancestor = host.parent(above);
        }
        roots.push(id);
    }
    roots
}

#[cfg(test)]
#[path = "tests/queue_tests.rs"]
mod tests;
