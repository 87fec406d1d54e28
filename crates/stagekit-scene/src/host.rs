//! The narrow tree interface negotiation consumes.

use stagekit_core::{Axis, NodeId, Point, Size};
use stagekit_layout::NodeLayoutState;

/// Everything the negotiation walk needs from the actor/tree layer.
///
/// Accessors are total: a dead or unknown id yields an empty child list,
/// `None` state, and zero geometry, and the walk skips it. The tree must not
/// be mutated while a pass runs; callbacks fired mid-walk may only record
/// requests for the next frame.
pub trait NegotiationHost {
    /// The actor's parent, if it has one.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Ordered child handles. Order never affects negotiated sizes (child
    /// extents combine by union), so any deterministic order is acceptable.
    fn children(&self, id: NodeId) -> &[NodeId];

    /// The actor's offset within its parent.
    fn child_position(&self, id: NodeId) -> Point;

    /// Content-intrinsic size, when the actor can supply one.
    fn natural_size(&self, id: NodeId) -> Option<Size>;

    /// Height derived from a resolved width. Consulted only when the height
    /// policy derives from the width.
    fn height_for_width(&self, id: NodeId, width: f32) -> f32;

    /// Width derived from a resolved height. Consulted only when the width
    /// policy derives from the height.
    fn width_for_height(&self, id: NodeId, height: f32) -> f32;

    /// The actor's negotiation state.
    fn layout(&self, id: NodeId) -> Option<&NodeLayoutState>;

    /// Mutable access to the actor's negotiation state.
    fn layout_mut(&mut self, id: NodeId) -> Option<&mut NodeLayoutState>;

    /// Fired exactly once per axis per completed negotiation of an actor;
    /// the receiver stores the value as the actor's authoritative size for
    /// the frame.
    fn on_size_negotiated(&mut self, id: NodeId, axis: Axis, value: f32);
}
