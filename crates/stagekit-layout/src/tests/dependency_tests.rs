use super::{resolve_order, DependencyCycle};
use crate::policy::ResizePolicy;
use stagekit_core::Axis;

#[test]
fn independent_axes_resolve_width_first() {
    let order = resolve_order(ResizePolicy::Fixed, ResizePolicy::UseNaturalSize).unwrap();
    assert_eq!(order, [Axis::Width, Axis::Height]);
}

#[test]
fn derived_height_resolves_after_width() {
    let order = resolve_order(
        ResizePolicy::UseNaturalSize,
        ResizePolicy::DimensionDependency,
    )
    .unwrap();
    assert_eq!(order, [Axis::Width, Axis::Height]);
}

#[test]
fn derived_width_resolves_after_height() {
    let order = resolve_order(
        ResizePolicy::DimensionDependency,
        ResizePolicy::UseNaturalSize,
    )
    .unwrap();
    assert_eq!(order, [Axis::Height, Axis::Width]);
}

#[test]
fn mutually_derived_axes_are_a_cycle() {
    let result = resolve_order(
        ResizePolicy::DimensionDependency,
        ResizePolicy::DimensionDependency,
    );
    assert_eq!(result, Err(DependencyCycle));
}

#[test]
fn parent_dependent_axes_are_not_a_cycle() {
    // Parent dependencies are ordered by the tree walk, not within the actor.
    let order = resolve_order(ResizePolicy::FillToParent, ResizePolicy::FillToParent).unwrap();
    assert_eq!(order, [Axis::Width, Axis::Height]);
}
