//! The two-pass negotiation walk.
//!
//! Given a dirty root and the allocation handed down by its parent (or the
//! viewport), a pass first measures content-driven axes bottom-up, then
//! applies final sizes top-down. Within each actor the axes resolve in the
//! order mandated by their cross-dimension dependency, and the external
//! size-assigned callback fires exactly once per axis.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use stagekit_core::{Axis, NodeId, Size};
use stagekit_layout::{resolve_order, size_query, LayoutError, ResizePolicy, SizeInputs};

use crate::host::NegotiationHost;

type ChildList = SmallVec<[NodeId; 8]>;

/// Progress of one actor through a pass. Absent from the map means
/// unvisited; `Applied` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Measuring,
    Measured,
    Applying,
    Applied,
}

/// What a pass over one dirty root produced.
#[derive(Debug, Default)]
pub struct NegotiationOutcome {
    /// Recoverable conditions met during the walk, already logged.
    pub diagnostics: Vec<LayoutError>,
    /// Actors that completed the apply step.
    pub negotiated: usize,
}

/// Negotiates the subtree under `root`, which was allocated `allocation` by
/// its parent. Never fails: malformed actors degrade to their natural size
/// and the walk continues.
pub fn negotiate<H: NegotiationHost>(
    host: &mut H,
    root: NodeId,
    allocation: Size,
) -> NegotiationOutcome {
    let mut pass = NegotiationPass::new(host);
    pass.reset(root);
    pass.measure(root);
    pass.apply(root, allocation);
    pass.into_outcome()
}

struct NegotiationPass<'a, H: NegotiationHost> {
    host: &'a mut H,
    phases: FxHashMap<NodeId, Phase>,
    /// (actor, axis) pairs currently being content-measured; re-entry means
    /// the dependency chain loops.
    measuring: FxHashSet<(NodeId, usize)>,
    /// Final content measurements, reused verbatim by the apply pass.
    measured: FxHashMap<(NodeId, usize), f32>,
    diagnostics: Vec<LayoutError>,
    negotiated: usize,
}

impl<'a, H: NegotiationHost> NegotiationPass<'a, H> {
    fn new(host: &'a mut H) -> Self {
        Self {
            host,
            phases: FxHashMap::default(),
            measuring: FxHashSet::default(),
            measured: FxHashMap::default(),
            diagnostics: Vec::new(),
            negotiated: 0,
        }
    }

    fn into_outcome(self) -> NegotiationOutcome {
        NegotiationOutcome {
            diagnostics: self.diagnostics,
            negotiated: self.negotiated,
        }
    }

    fn enabled(&self, id: NodeId) -> bool {
        self.host
            .layout(id)
            .map(|state| state.relayout_enabled())
            .unwrap_or(false)
    }

    fn children_of(&self, id: NodeId) -> ChildList {
        self.host.children(id).iter().copied().collect()
    }

    /// Clears frame-scoped bits below `root` before the walk starts.
    fn reset(&mut self, root: NodeId) {
        if !self.enabled(root) {
            return;
        }
        if let Some(state) = self.host.layout_mut(root) {
            state.reset_negotiated();
        }
        for child in self.children_of(root) {
            self.reset(child);
        }
    }

    /// Post-order content measurement. Computes natural- and child-driven
    /// axes before any allocation is final; descends only under actors that
    /// fit their children. Axes the apply pass can resolve directly are left
    /// alone here.
    fn measure(&mut self, id: NodeId) {
        if !self.enabled(id) || matches!(self.phases.get(&id), Some(Phase::Measured)) {
            return;
        }
        self.phases.insert(id, Phase::Measuring);
        let fits_children = {
            let Some(state) = self.host.layout(id) else {
                return;
            };
            Axis::BOTH
                .into_iter()
                .any(|axis| state.policy(axis).depends_on_children())
        };
        if fits_children {
            for child in self.children_of(id) {
                self.measure(child);
            }
        }
        for axis in Axis::BOTH {
            let content_driven = self
                .host
                .layout(id)
                .map(|state| state.policy(axis).is_content_driven())
                .unwrap_or(false);
            if content_driven {
                let _ = self.measure_axis(id, axis);
            }
        }
        self.phases.insert(id, Phase::Measured);
    }

    /// Content value for one axis, plus a flag telling whether the value is
    /// final. A measurement that had to fall back because it reached an axis
    /// still waiting on allocation is provisional: it is not cached, and the
    /// apply pass recomputes the axis against final values.
    fn measure_axis(&mut self, id: NodeId, axis: Axis) -> (f32, bool) {
        let key = (id, axis.index());
        if let Some(value) = self.measured.get(&key) {
            return (*value, true);
        }
        if !self.measuring.insert(key) {
            self.report(LayoutError::CyclicDependency { id });
            return (self.natural_axis(id, axis), false);
        }
        let Some(state) = self.host.layout(id) else {
            self.measuring.remove(&key);
            return (0.0, true);
        };
        let policy = state.policy(axis);
        let explicit = state.explicit_size().get(axis);
        let (value, reliable) = match policy {
            ResizePolicy::Fixed => (explicit, true),
            ResizePolicy::UseNaturalSize => (self.natural_axis(id, axis), true),
            ResizePolicy::FitToChildren => self.children_extent(id, axis),
            ResizePolicy::DimensionDependency => {
                let opposite = axis.opposite();
                let (other, other_reliable) = self.measure_axis(id, opposite);
                let other = self.clamped(id, opposite, other);
                (self.derive(id, axis, other), other_reliable)
            }
            // Allocation-dependent policies cannot be content-measured;
            // being asked for one here means a fit chain loops back through
            // an ancestor's allocation.
            _ => {
                self.report(LayoutError::CyclicDependency { id });
                (self.natural_axis(id, axis), false)
            }
        };
        self.measuring.remove(&key);
        if reliable {
            self.measured.insert(key, value);
        }
        (value, reliable)
    }

    /// Union extent of the enabled children along `axis`: the maximum of
    /// child size plus child offset, zero with no children.
    fn children_extent(&mut self, id: NodeId, axis: Axis) -> (f32, bool) {
        let mut extent = 0.0_f32;
        let mut reliable = true;
        for child in self.children_of(id) {
            if !self.enabled(child) {
                continue;
            }
            let (value, child_reliable) = self.measure_axis(child, axis);
            let value = self.clamped(child, axis, value);
            extent = extent.max(value + self.host.child_position(child).get(axis));
            reliable &= child_reliable;
        }
        (extent, reliable)
    }

    fn derive(&self, id: NodeId, axis: Axis, other: f32) -> f32 {
        match axis {
            Axis::Width => self.host.width_for_height(id, other),
            Axis::Height => self.host.height_for_width(id, other),
        }
    }

    fn clamped(&self, id: NodeId, axis: Axis, value: f32) -> f32 {
        self.host
            .layout(id)
            .map(|state| state.limit(axis).clamp(value))
            .unwrap_or(value)
    }

    fn natural_axis(&mut self, id: NodeId, axis: Axis) -> f32 {
        match self.host.natural_size(id) {
            Some(size) => size.get(axis),
            None => {
                self.report(LayoutError::MissingNaturalSize { id });
                0.0
            }
        }
    }

    fn report(&mut self, error: LayoutError) {
        if !self.diagnostics.contains(&error) {
            log::warn!("{error}");
            self.diagnostics.push(error);
        }
    }

    /// Pre-order application: resolves both axes in dependency order against
    /// the just-resolved parent allocation, publishes them, then recurses
    /// with this actor's size as the children's allocation.
    fn apply(&mut self, id: NodeId, allocation: Size) {
        if !self.enabled(id) {
            // Skipped entirely; keeps reporting its last explicit size.
            return;
        }
        debug_assert!(
            !matches!(self.phases.get(&id), Some(Phase::Applied)),
            "actor {id} reached twice in one apply pass"
        );
        self.phases.insert(id, Phase::Applying);
        let (width_policy, height_policy) = {
            let Some(state) = self.host.layout(id) else {
                return;
            };
            (state.policy(Axis::Width), state.policy(Axis::Height))
        };
        match resolve_order(width_policy, height_policy) {
            Ok(order) => {
                for axis in order {
                    let value = self.resolve_axis(id, axis, allocation);
                    self.assign(id, axis, value);
                }
            }
            Err(_) => {
                self.report(LayoutError::CyclicDependency { id });
                for axis in Axis::BOTH {
                    let natural = self.natural_axis(id, axis);
                    self.assign(id, axis, natural);
                }
            }
        }
        let resolved = self
            .host
            .layout(id)
            .map(|state| state.resolved_size())
            .unwrap_or(Size::ZERO);
        for axis in Axis::BOTH {
            self.host.on_size_negotiated(id, axis, resolved.get(axis));
        }
        self.negotiated += 1;
        self.phases.insert(id, Phase::Applied);
        for child in self.children_of(id) {
            self.apply(child, resolved);
        }
    }

    /// Clamps, stores, and marks one resolved axis.
    fn assign(&mut self, id: NodeId, axis: Axis, value: f32) {
        if let Some(state) = self.host.layout_mut(id) {
            let value = state.limit(axis).clamp(value);
            state.set_resolved(axis, value);
            state.clear_dirty(axis);
            state.set_negotiated(axis);
        }
    }

    /// Final value for one axis. Content measurements from the measure pass
    /// are reused verbatim; everything else goes through the policy
    /// formulas with the neighbor values that are now final.
    fn resolve_axis(&mut self, id: NodeId, axis: Axis, allocation: Size) -> f32 {
        if let Some(value) = self.measured.get(&(id, axis.index())) {
            return *value;
        }
        let (policy, explicit, factor, offset) = {
            let Some(state) = self.host.layout(id) else {
                return 0.0;
            };
            (
                state.policy(axis),
                state.explicit_size().get(axis),
                state.factor(axis),
                state.offset(axis),
            )
        };
        let mut inputs = SizeInputs {
            explicit,
            parent: allocation.get(axis),
            factor,
            offset,
            ..SizeInputs::default()
        };
        match policy {
            ResizePolicy::UseNaturalSize => inputs.natural = self.measure_axis(id, axis).0,
            ResizePolicy::FitToChildren => inputs.children_extent = self.measure_axis(id, axis).0,
            ResizePolicy::DimensionDependency => {
                // The other axis resolved first in this actor's order, so
                // the derivation sees its final value.
                let other = self
                    .host
                    .layout(id)
                    .map(|state| state.resolved(axis.opposite()))
                    .unwrap_or(0.0);
                inputs.derived = self.derive(id, axis, other);
            }
            _ => {}
        }
        size_query::resolve(policy, &inputs)
    }
}
