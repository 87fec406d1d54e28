use super::{NodeLayoutState, SizeLimit};
use crate::policy::ResizePolicy;
use stagekit_core::{Axes, Axis, Size};

#[test]
fn new_actors_start_dirty_on_both_axes() {
    let state = NodeLayoutState::new();
    assert!(state.is_dirty(Axis::Width));
    assert!(state.is_dirty(Axis::Height));
    assert_eq!(state.policy(Axis::Width), ResizePolicy::UseNaturalSize);
}

#[test]
fn set_policy_dirties_only_changed_axes() {
    let mut state = NodeLayoutState::new();
    state.clear_dirty(Axis::Width);
    state.clear_dirty(Axis::Height);

    assert!(state.set_policy(ResizePolicy::Fixed, Axes::WIDTH));
    assert!(state.is_dirty(Axis::Width));
    assert!(!state.is_dirty(Axis::Height));

    // Same policy again is a no-op.
    state.clear_dirty(Axis::Width);
    assert!(!state.set_policy(ResizePolicy::Fixed, Axes::WIDTH));
    assert!(!state.is_dirty(Axis::Width));
}

#[test]
fn explicit_size_marks_dirty_only_on_change() {
    let mut state = NodeLayoutState::new();
    state.clear_dirty(Axis::Width);
    state.clear_dirty(Axis::Height);

    assert!(state.set_explicit_size(Size::new(150.0, 100.0)));
    assert!(state.any_dirty());
    assert!(!state.set_explicit_size(Size::new(150.0, 100.0)));
}

#[test]
fn size_limit_clamps_with_minimum_winning() {
    let limit = SizeLimit::new(10.0, 100.0);
    assert_eq!(limit.clamp(5.0), 10.0);
    assert_eq!(limit.clamp(50.0), 50.0);
    assert_eq!(limit.clamp(500.0), 100.0);

    let degenerate = SizeLimit::new(20.0, 10.0);
    assert_eq!(degenerate.clamp(15.0), 20.0);
}

#[test]
fn default_limit_is_unbounded() {
    let limit = SizeLimit::default();
    assert_eq!(limit.clamp(1.0e9), 1.0e9);
    assert_eq!(limit.clamp(-5.0), 0.0);
}

#[test]
fn re_enabling_relayout_marks_both_axes_dirty() {
    let mut state = NodeLayoutState::new();
    state.clear_dirty(Axis::Width);
    state.clear_dirty(Axis::Height);

    assert!(state.set_relayout_enabled(false));
    assert!(!state.any_dirty());

    assert!(state.set_relayout_enabled(true));
    assert!(state.is_dirty(Axis::Width));
    assert!(state.is_dirty(Axis::Height));
}
