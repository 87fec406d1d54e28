//! The stagekit size-negotiation engine.
//!
//! A retained actor tree carries an independent resize policy per axis.
//! Property mutation marks per-actor state dirty and queues the actor as a
//! relayout candidate; once per frame, before render-data extraction, the
//! queue is flushed and every surviving dirty root is negotiated with a
//! measure pass (bottom-up content sizes) followed by an apply pass
//! (top-down allocation), honoring width↔height dependencies within each
//! actor.
//!
//! The engine reaches the tree only through [`NegotiationHost`];
//! [`MemoryStage`] is the in-process implementation used by shells and
//! tests.

mod host;
pub mod queue;
mod stage;
pub mod walker;

pub use host::NegotiationHost;
pub use queue::RelayoutRequestQueue;
pub use stage::{AspectRatio, FixedNaturalSize, MemoryStage, SizeDelegate};
pub use walker::{negotiate, NegotiationOutcome};

pub use stagekit_core::{Axes, Axis, NodeId, Point, Size, StageError};
pub use stagekit_layout::{LayoutError, NodeLayoutState, ResizePolicy, SizeLimit};
