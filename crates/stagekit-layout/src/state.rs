//! Per-actor negotiation state.

use crate::policy::ResizePolicy;
use stagekit_core::{Axes, Axis, Size};

/// Per-axis bounds applied to every resolved size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeLimit {
    pub min: f32,
    pub max: f32,
}

impl Default for SizeLimit {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: f32::INFINITY,
        }
    }
}

impl SizeLimit {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamps `value` into these bounds; the minimum wins if they disagree.
    #[inline]
    pub fn clamp(self, value: f32) -> f32 {
        value.min(self.max).max(self.min)
    }
}

/// Cache of everything negotiation knows about one actor.
///
/// Lifetime-bound to the actor it describes. The resolved size for an axis is
/// only meaningful to external consumers once that axis's dirty bit is clear;
/// the negotiated bits are frame-scoped and reset at the start of every pass
/// that reaches the actor.
#[derive(Clone, Debug)]
pub struct NodeLayoutState {
    policies: [ResizePolicy; 2],
    factor: Size,
    offset: Size,
    explicit: Size,
    explicit_assigned: bool,
    resolved: Size,
    limits: [SizeLimit; 2],
    dirty: [bool; 2],
    negotiated: [bool; 2],
    relayout_enabled: bool,
}

impl Default for NodeLayoutState {
    fn default() -> Self {
        Self {
            policies: [ResizePolicy::default(); 2],
            factor: Size::new(1.0, 1.0),
            offset: Size::ZERO,
            explicit: Size::ZERO,
            explicit_assigned: false,
            resolved: Size::ZERO,
            limits: [SizeLimit::default(); 2],
            // New actors need an initial negotiation on both axes.
            dirty: [true; 2],
            negotiated: [false; 2],
            relayout_enabled: true,
        }
    }
}

impl NodeLayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(&self, axis: Axis) -> ResizePolicy {
        self.policies[axis.index()]
    }

    /// Sets the policy for every axis in `axes`. Returns true if anything
    /// changed; changed axes are marked dirty.
    pub fn set_policy(&mut self, policy: ResizePolicy, axes: Axes) -> bool {
        let mut changed = false;
        for axis in axes.iter() {
            if self.policies[axis.index()] != policy {
                self.policies[axis.index()] = policy;
                self.dirty[axis.index()] = true;
                changed = true;
            }
        }
        changed
    }

    pub fn factor(&self, axis: Axis) -> f32 {
        self.factor.get(axis)
    }

    pub fn set_factor(&mut self, factor: Size) -> bool {
        if self.factor == factor {
            return false;
        }
        self.factor = factor;
        self.mark_dirty(Axes::ALL);
        true
    }

    pub fn offset(&self, axis: Axis) -> f32 {
        self.offset.get(axis)
    }

    pub fn set_offset(&mut self, offset: Size) -> bool {
        if self.offset == offset {
            return false;
        }
        self.offset = offset;
        self.mark_dirty(Axes::ALL);
        true
    }

    /// The last explicitly assigned size. Disabled actors report this value.
    pub fn explicit_size(&self) -> Size {
        self.explicit
    }

    pub fn set_explicit_size(&mut self, size: Size) -> bool {
        self.explicit_assigned = true;
        if self.explicit == size {
            return false;
        }
        self.explicit = size;
        self.mark_dirty(Axes::ALL);
        true
    }

    /// True once an explicit size has ever been assigned.
    pub fn has_explicit_size(&self) -> bool {
        self.explicit_assigned
    }

    pub fn resolved(&self, axis: Axis) -> f32 {
        self.resolved.get(axis)
    }

    pub fn resolved_size(&self) -> Size {
        self.resolved
    }

    pub fn set_resolved(&mut self, axis: Axis, value: f32) {
        self.resolved.set(axis, value);
    }

    pub fn limit(&self, axis: Axis) -> SizeLimit {
        self.limits[axis.index()]
    }

    pub fn set_limit(&mut self, limit: SizeLimit, axes: Axes) -> bool {
        let mut changed = false;
        for axis in axes.iter() {
            if self.limits[axis.index()] != limit {
                self.limits[axis.index()] = limit;
                self.dirty[axis.index()] = true;
                changed = true;
            }
        }
        changed
    }

    pub fn is_dirty(&self, axis: Axis) -> bool {
        self.dirty[axis.index()]
    }

    pub fn any_dirty(&self) -> bool {
        self.dirty[0] || self.dirty[1]
    }

    pub fn mark_dirty(&mut self, axes: Axes) {
        for axis in axes.iter() {
            self.dirty[axis.index()] = true;
        }
    }

    pub fn clear_dirty(&mut self, axis: Axis) {
        self.dirty[axis.index()] = false;
    }

    pub fn is_negotiated(&self, axis: Axis) -> bool {
        self.negotiated[axis.index()]
    }

    pub fn set_negotiated(&mut self, axis: Axis) {
        self.negotiated[axis.index()] = true;
    }

    pub fn reset_negotiated(&mut self) {
        self.negotiated = [false; 2];
    }

    pub fn relayout_enabled(&self) -> bool {
        self.relayout_enabled
    }

    pub fn set_relayout_enabled(&mut self, enabled: bool) -> bool {
        if self.relayout_enabled == enabled {
            return false;
        }
        self.relayout_enabled = enabled;
        if enabled {
            self.mark_dirty(Axes::ALL);
        }
        true
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
