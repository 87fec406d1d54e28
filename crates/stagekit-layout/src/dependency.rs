//! Intra-actor axis ordering for cross-dimension dependencies.

use crate::policy::ResizePolicy;
use stagekit_core::Axis;

/// Both axes of one actor derive from each other; no valid order exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DependencyCycle;

impl std::fmt::Display for DependencyCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "width and height derive from each other")
    }
}

impl std::error::Error for DependencyCycle {}

/// Returns the order in which an actor's axes must be resolved.
///
/// An axis with [`ResizePolicy::DimensionDependency`] resolves after the axis
/// it derives from. Independent axes resolve width-first; either order would
/// be valid.
pub fn resolve_order(
    width: ResizePolicy,
    height: ResizePolicy,
) -> Result<[Axis; 2], DependencyCycle> {
    match (
        width.derives_from_other_axis(),
        height.derives_from_other_axis(),
    ) {
        (true, true) => Err(DependencyCycle),
        (true, false) => Ok([Axis::Height, Axis::Width]),
        _ => Ok([Axis::Width, Axis::Height]),
    }
}

#[cfg(test)]
#[path = "tests/dependency_tests.rs"]
mod tests;
