//! Per-policy size formulas.
//!
//! [`resolve`] is stateless: the caller gathers every neighbor value the
//! policy could need into [`SizeInputs`] and gets back a concrete size for
//! one axis. Clamping to the actor's size limits is the caller's job (see
//! [`crate::SizeLimit`]); the formulas themselves are unclamped.

use crate::policy::ResizePolicy;

/// Already-resolved neighbor values for one axis of one actor.
///
/// Only the fields the policy reads need to be meaningful; the rest may stay
/// at their defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct SizeInputs {
    /// Last explicitly assigned size for this axis.
    pub explicit: f32,
    /// Content-intrinsic size for this axis (0 when the actor cannot supply
    /// one).
    pub natural: f32,
    /// The parent's allocation for this axis.
    pub parent: f32,
    /// Multiplier for [`ResizePolicy::SizeRelativeToParent`].
    pub factor: f32,
    /// Additive offset for [`ResizePolicy::SizeFixedOffsetFromParent`].
    pub offset: f32,
    /// Union extent of the children along this axis (0 with no children).
    pub children_extent: f32,
    /// Value derived from the other axis for
    /// [`ResizePolicy::DimensionDependency`].
    pub derived: f32,
}

/// Resolves one axis of one actor under `policy`.
pub fn resolve(policy: ResizePolicy, inputs: &SizeInputs) -> f32 {
    match policy {
        ResizePolicy::Fixed => inputs.explicit,
        ResizePolicy::UseNaturalSize => inputs.natural,
        ResizePolicy::FillToParent => inputs.parent,
        ResizePolicy::SizeRelativeToParent => inputs.parent * inputs.factor,
        ResizePolicy::SizeFixedOffsetFromParent => inputs.parent + inputs.offset,
        ResizePolicy::FitToChildren => inputs.children_extent.max(0.0),
        ResizePolicy::DimensionDependency => inputs.derived,
    }
}

#[cfg(test)]
#[path = "tests/size_query_tests.rs"]
mod tests;
