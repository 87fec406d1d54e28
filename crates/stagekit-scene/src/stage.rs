//! In-memory actor stage.
//!
//! `MemoryStage` owns the actor arena, the relayout queue, and the viewport
//! allocation handed to parentless roots. Property setters mark the affected
//! state dirty and queue a relayout request; `flush_relayout` is the
//! once-per-frame tick that coalesces requests and negotiates each surviving
//! root.

use std::rc::Rc;

use stagekit_core::{Axes, Axis, NodeId, Point, Size, StageError};
use stagekit_layout::{LayoutError, NodeLayoutState, ResizePolicy, SizeLimit};

use crate::host::NegotiationHost;
use crate::queue::{coalesce_roots, RelayoutRequestQueue};
use crate::walker;

/// Content callbacks an actor supplies to negotiation.
///
/// The derivation callbacks are consulted only when the corresponding axis
/// policy derives from the other axis; the defaults fall back to the natural
/// size.
pub trait SizeDelegate {
    /// Content-intrinsic size, when the actor can provide one.
    fn natural_size(&self) -> Option<Size> {
        None
    }

    /// Height for an already-resolved width.
    fn height_for_width(&self, _width: f32) -> f32 {
        self.natural_size().map(|size| size.height).unwrap_or(0.0)
    }

    /// Width for an already-resolved height.
    fn width_for_height(&self, _height: f32) -> f32 {
        self.natural_size().map(|size| size.width).unwrap_or(0.0)
    }
}

/// Delegate with a constant content size.
#[derive(Clone, Copy, Debug)]
pub struct FixedNaturalSize(pub Size);

impl SizeDelegate for FixedNaturalSize {
    fn natural_size(&self) -> Option<Size> {
        Some(self.0)
    }
}

/// Delegate deriving each axis from the other by a constant ratio.
#[derive(Clone, Copy, Debug)]
pub struct AspectRatio {
    pub natural: Size,
    /// height = height_per_width · width
    pub height_per_width: f32,
    /// width = width_per_height · height
    pub width_per_height: f32,
}

impl SizeDelegate for AspectRatio {
    fn natural_size(&self) -> Option<Size> {
        Some(self.natural)
    }

    fn height_for_width(&self, width: f32) -> f32 {
        self.height_per_width * width
    }

    fn width_for_height(&self, height: f32) -> f32 {
        self.width_per_height * height
    }
}

struct ActorRecord {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: Point,
    delegate: Option<Rc<dyn SizeDelegate>>,
    layout: NodeLayoutState,
}

impl ActorRecord {
    fn new(delegate: Option<Rc<dyn SizeDelegate>>) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            position: Point::ZERO,
            delegate,
            layout: NodeLayoutState::new(),
        }
    }
}

/// In-memory stage implementing [`NegotiationHost`].
pub struct MemoryStage {
    actors: Vec<Option<ActorRecord>>,
    queue: RelayoutRequestQueue,
    viewport: Size,
    diagnostics: Vec<LayoutError>,
    size_events: Vec<(NodeId, Axis, f32)>,
}

impl Default for MemoryStage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStage {
    pub fn new() -> Self {
        Self {
            actors: Vec::new(),
            queue: RelayoutRequestQueue::new(),
            viewport: Size::ZERO,
            diagnostics: Vec::new(),
            size_events: Vec::new(),
        }
    }

    pub fn with_viewport(viewport: Size) -> Self {
        let mut stage = Self::new();
        stage.viewport = viewport;
        stage
    }

    fn record(&self, id: NodeId) -> Result<&ActorRecord, StageError> {
        self.actors
            .get(id)
            .and_then(|slot| slot.as_ref())
            .ok_or(StageError::Missing { id })
    }

    fn record_mut(&mut self, id: NodeId) -> Result<&mut ActorRecord, StageError> {
        self.actors
            .get_mut(id)
            .and_then(|slot| slot.as_mut())
            .ok_or(StageError::Missing { id })
    }

    /// Creates a detached actor with no content delegate.
    pub fn create_actor(&mut self) -> NodeId {
        self.create_actor_inner(None)
    }

    /// Creates a detached actor whose content callbacks come from `delegate`.
    pub fn create_actor_with_delegate(&mut self, delegate: Rc<dyn SizeDelegate>) -> NodeId {
        self.create_actor_inner(Some(delegate))
    }

    fn create_actor_inner(&mut self, delegate: Option<Rc<dyn SizeDelegate>>) -> NodeId {
        let id = self.actors.len();
        self.actors.push(Some(ActorRecord::new(delegate)));
        // New actors start dirty on both axes.
        self.queue.request(id);
        id
    }

    /// Removes `id` and its whole subtree, dropping any pending requests
    /// that reference the removed actors.
    pub fn remove_actor(&mut self, id: NodeId) -> Result<(), StageError> {
        let parent = self.record(id)?.parent;
        if let Some(parent_id) = parent {
            if let Ok(parent_record) = self.record_mut(parent_id) {
                parent_record.children.retain(|child| *child != id);
            }
        }
        self.remove_subtree(id);
        if let Some(parent_id) = parent {
            if self.fits_children(parent_id) {
                self.request_relayout(parent_id);
            }
        }
        Ok(())
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let children = match self.record(id) {
            Ok(record) => record.children.clone(),
            Err(_) => return,
        };
        for child in children {
            self.remove_subtree(child);
        }
        self.queue.cancel(id);
        self.actors[id] = None;
    }

    /// Attaches `child` under `parent`, detaching it from any previous
    /// parent first. The caller must keep the graph a tree.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), StageError> {
        self.record(parent)?;
        let previous = self.record(child)?.parent;
        if previous == Some(parent) {
            return Ok(());
        }
        if let Some(previous_id) = previous {
            if let Ok(previous_record) = self.record_mut(previous_id) {
                previous_record.children.retain(|c| *c != child);
            }
            if self.fits_children(previous_id) {
                self.request_relayout(previous_id);
            }
        }
        self.record_mut(parent)?.children.push(child);
        self.record_mut(child)?.parent = Some(parent);
        self.record_mut(child)?.layout.mark_dirty(Axes::ALL);
        self.request_relayout(child);
        Ok(())
    }

    /// Detaches `child` from `parent`, leaving it parentless (its
    /// allocation now comes from the viewport).
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), StageError> {
        self.record_mut(parent)?.children.retain(|c| *c != child);
        let child_record = self.record_mut(child)?;
        child_record.parent = None;
        child_record.layout.mark_dirty(Axes::ALL);
        if self.fits_children(parent) {
            self.request_relayout(parent);
        }
        self.request_relayout(child);
        Ok(())
    }

    pub fn parent_of(&self, id: NodeId) -> Result<Option<NodeId>, StageError> {
        Ok(self.record(id)?.parent)
    }

    pub fn children_of(&self, id: NodeId) -> Result<&[NodeId], StageError> {
        Ok(self.record(id)?.children.as_slice())
    }

    pub fn set_delegate(&mut self, id: NodeId, delegate: Rc<dyn SizeDelegate>) -> Result<(), StageError> {
        let record = self.record_mut(id)?;
        record.delegate = Some(delegate);
        record.layout.mark_dirty(Axes::ALL);
        self.request_relayout(id);
        Ok(())
    }

    pub fn set_resize_policy(
        &mut self,
        id: NodeId,
        policy: ResizePolicy,
        axes: Axes,
    ) -> Result<(), StageError> {
        if self.record_mut(id)?.layout.set_policy(policy, axes) {
            self.request_relayout(id);
        }
        Ok(())
    }

    pub fn set_explicit_size(&mut self, id: NodeId, size: Size) -> Result<(), StageError> {
        if self.record_mut(id)?.layout.set_explicit_size(size) {
            self.request_relayout(id);
        }
        Ok(())
    }

    pub fn set_size_factor(&mut self, id: NodeId, factor: Size) -> Result<(), StageError> {
        if self.record_mut(id)?.layout.set_factor(factor) {
            self.request_relayout(id);
        }
        Ok(())
    }

    pub fn set_size_offset(&mut self, id: NodeId, offset: Size) -> Result<(), StageError> {
        if self.record_mut(id)?.layout.set_offset(offset) {
            self.request_relayout(id);
        }
        Ok(())
    }

    pub fn set_size_limit(
        &mut self,
        id: NodeId,
        limit: SizeLimit,
        axes: Axes,
    ) -> Result<(), StageError> {
        if self.record_mut(id)?.layout.set_limit(limit, axes) {
            self.request_relayout(id);
        }
        Ok(())
    }

    /// Moves `id` within its parent. Only content-fitting ancestors care, so
    /// nothing is queued otherwise.
    pub fn set_position(&mut self, id: NodeId, position: Point) -> Result<(), StageError> {
        let record = self.record_mut(id)?;
        if record.position == position {
            return Ok(());
        }
        record.position = position;
        if let Some(parent) = self.record(id)?.parent {
            if self.fits_children(parent) {
                self.request_relayout(parent);
            }
        }
        Ok(())
    }

    pub fn set_relayout_enabled(&mut self, id: NodeId, enabled: bool) -> Result<(), StageError> {
        if self.record_mut(id)?.layout.set_relayout_enabled(enabled) {
            self.request_relayout(id);
        }
        Ok(())
    }

    /// Resizes the window/viewport allocation used by parentless roots and
    /// queues them for renegotiation.
    pub fn set_viewport_size(&mut self, viewport: Size) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        let roots: Vec<NodeId> = (0..self.actors.len())
            .filter(|&id| matches!(self.record(id), Ok(record) if record.parent.is_none()))
            .collect();
        for root in roots {
            self.request_relayout(root);
        }
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn fits_children(&self, id: NodeId) -> bool {
        self.record(id).is_ok_and(|record| {
            record.layout.relayout_enabled()
                && Axis::BOTH
                    .into_iter()
                    .any(|axis| record.layout.policy(axis).depends_on_children())
        })
    }

    /// Queues a relayout rooted at the minimal ancestor chain that the
    /// change can affect: the topmost contiguous content-fitting ancestor,
    /// or `id` itself when no ancestor fits its children.
    pub fn request_relayout(&mut self, id: NodeId) {
        if self.record(id).is_err() {
            return;
        }
        let mut target = id;
        loop {
            let parent = match self.record(target) {
                Ok(record) => record.parent,
                Err(_) => break,
            };
            match parent {
                Some(parent_id) if self.fits_children(parent_id) => target = parent_id,
                _ => break,
            }
        }
        self.queue.request(target);
    }

    /// Once-per-frame tick: coalesces pending requests and negotiates each
    /// surviving dirty root. Never fails; malformed subtrees degrade and
    /// their diagnostics are retained for [`Self::take_layout_diagnostics`].
    pub fn flush_relayout(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        let pending = self.queue.take_pending();
        let roots = coalesce_roots(self, &pending);
        log::debug!(
            "relayout flush: {} request(s) coalesced to {} root(s)",
            pending.len(),
            roots.len()
        );
        for root in roots {
            let allocation = self.allocation_for(root);
            let outcome = walker::negotiate(self, root, allocation);
            self.diagnostics.extend(outcome.diagnostics);
        }
    }

    /// The allocation a negotiation rooted at `root` starts from: the
    /// parent's last resolved size, or the viewport for parentless roots.
    fn allocation_for(&self, root: NodeId) -> Size {
        match self.record(root).ok().and_then(|record| record.parent) {
            Some(parent) => self.reported_size(parent),
            None => self.viewport,
        }
    }

    /// The size the actor reports to consumers: its negotiated size, or for
    /// relayout-disabled actors the last explicitly assigned size (falling
    /// back to the natural size).
    pub fn reported_size(&self, id: NodeId) -> Size {
        let Ok(record) = self.record(id) else {
            return Size::ZERO;
        };
        if record.layout.relayout_enabled() {
            record.layout.resolved_size()
        } else if record.layout.has_explicit_size() {
            record.layout.explicit_size()
        } else {
            record
                .delegate
                .as_ref()
                .and_then(|delegate| delegate.natural_size())
                .unwrap_or(Size::ZERO)
        }
    }

    pub fn layout_state(&self, id: NodeId) -> Result<&NodeLayoutState, StageError> {
        Ok(&self.record(id)?.layout)
    }

    pub fn pending_requests(&self) -> usize {
        self.queue.len()
    }

    pub fn has_pending_request(&self, id: NodeId) -> bool {
        self.queue.contains(id)
    }

    /// Drains the diagnostics recorded since the last call.
    pub fn take_layout_diagnostics(&mut self) -> Vec<LayoutError> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Drains the size-assigned events recorded since the last call, in
    /// delivery order.
    pub fn take_size_events(&mut self) -> Vec<(NodeId, Axis, f32)> {
        std::mem::take(&mut self.size_events)
    }

    pub fn len(&self) -> usize {
        self.actors.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NegotiationHost for MemoryStage {
    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.record(id).ok().and_then(|record| record.parent)
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        self.record(id)
            .map(|record| record.children.as_slice())
            .unwrap_or(&[])
    }

    fn child_position(&self, id: NodeId) -> Point {
        self.record(id)
            .map(|record| record.position)
            .unwrap_or(Point::ZERO)
    }

    fn natural_size(&self, id: NodeId) -> Option<Size> {
        self.record(id)
            .ok()
            .and_then(|record| record.delegate.as_ref())
            .and_then(|delegate| delegate.natural_size())
    }

    fn height_for_width(&self, id: NodeId, width: f32) -> f32 {
        self.record(id)
            .ok()
            .and_then(|record| record.delegate.as_ref())
            .map(|delegate| delegate.height_for_width(width))
            .unwrap_or(0.0)
    }

    fn width_for_height(&self, id: NodeId, height: f32) -> f32 {
        self.record(id)
            .ok()
            .and_then(|record| record.delegate.as_ref())
            .map(|delegate| delegate.width_for_height(height))
            .unwrap_or(0.0)
    }

    fn layout(&self, id: NodeId) -> Option<&NodeLayoutState> {
        self.record(id).ok().map(|record| &record.layout)
    }

    fn layout_mut(&mut self, id: NodeId) -> Option<&mut NodeLayoutState> {
        self.record_mut(id).ok().map(|record| &mut record.layout)
    }

    fn on_size_negotiated(&mut self, id: NodeId, axis: Axis, value: f32) {
        self.size_events.push((id, axis, value));
    }
}
