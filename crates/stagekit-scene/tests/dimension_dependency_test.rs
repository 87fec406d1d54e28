//! Cross-axis derivation: ordering, final-value guarantees, cycles, limits.

use std::rc::Rc;

use stagekit_scene::{
    AspectRatio, Axes, Axis, FixedNaturalSize, LayoutError, MemoryStage, ResizePolicy, Size,
    SizeLimit,
};

fn aspect_delegate() -> Rc<AspectRatio> {
    Rc::new(AspectRatio {
        natural: Size::new(150.0, 180.0),
        height_per_width: 1.7,
        width_per_height: 3.5,
    })
}

#[test]
fn width_derives_from_natural_height() {
    let mut stage = MemoryStage::with_viewport(Size::new(480.0, 800.0));
    let actor = stage.create_actor_with_delegate(aspect_delegate());
    stage
        .set_resize_policy(actor, ResizePolicy::DimensionDependency, Axes::WIDTH)
        .unwrap();
    stage.flush_relayout();

    // height stays natural (180); width = 3.5 · 180.
    assert_eq!(stage.reported_size(actor), Size::new(630.0, 180.0));
}

#[test]
fn height_derives_from_natural_width() {
    let mut stage = MemoryStage::with_viewport(Size::new(480.0, 800.0));
    let actor = stage.create_actor_with_delegate(aspect_delegate());
    stage
        .set_resize_policy(actor, ResizePolicy::DimensionDependency, Axes::HEIGHT)
        .unwrap();
    stage.flush_relayout();

    // width stays natural (150); height = 1.7 · 150.
    assert_eq!(stage.reported_size(actor), Size::new(150.0, 255.0));
}

#[test]
fn derivation_sees_the_final_value_of_the_other_axis() {
    let mut stage = MemoryStage::with_viewport(Size::new(480.0, 800.0));
    let parent = stage.create_actor();
    stage
        .set_resize_policy(parent, ResizePolicy::Fixed, Axes::ALL)
        .unwrap();
    stage.set_explicit_size(parent, Size::new(200.0, 300.0)).unwrap();

    // Height fills the parent, width derives from height; the derivation
    // must see the allocated 300, not the natural height.
    let child = stage.create_actor_with_delegate(Rc::new(AspectRatio {
        natural: Size::new(10.0, 10.0),
        height_per_width: 2.0,
        width_per_height: 0.5,
    }));
    stage
        .set_resize_policy(child, ResizePolicy::FillToParent, Axes::HEIGHT)
        .unwrap();
    stage
        .set_resize_policy(child, ResizePolicy::DimensionDependency, Axes::WIDTH)
        .unwrap();
    stage.add_child(parent, child).unwrap();
    stage.flush_relayout();

    assert_eq!(stage.reported_size(child), Size::new(150.0, 300.0));
}

#[test]
fn mutually_derived_axes_fall_back_to_natural_size() {
    let mut stage = MemoryStage::with_viewport(Size::new(480.0, 800.0));
    let cyclic = stage.create_actor_with_delegate(aspect_delegate());
    stage
        .set_resize_policy(cyclic, ResizePolicy::DimensionDependency, Axes::ALL)
        .unwrap();
    let healthy = stage.create_actor();
    stage
        .set_resize_policy(healthy, ResizePolicy::Fixed, Axes::ALL)
        .unwrap();
    stage.set_explicit_size(healthy, Size::new(40.0, 40.0)).unwrap();
    stage.flush_relayout();

    assert_eq!(stage.reported_size(cyclic), Size::new(150.0, 180.0));
    // The rest of the frame still negotiates.
    assert_eq!(stage.reported_size(healthy), Size::new(40.0, 40.0));

    let diagnostics = stage.take_layout_diagnostics();
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d, LayoutError::CyclicDependency { id } if *id == cyclic)));
}

#[test]
fn fit_parent_over_parent_filling_child_degrades_to_natural_size() {
    let mut stage = MemoryStage::with_viewport(Size::new(480.0, 800.0));
    let parent = stage.create_actor();
    stage
        .set_resize_policy(parent, ResizePolicy::FitToChildren, Axes::WIDTH)
        .unwrap();
    let child =
        stage.create_actor_with_delegate(Rc::new(FixedNaturalSize(Size::new(25.0, 25.0))));
    stage
        .set_resize_policy(child, ResizePolicy::FillToParent, Axes::WIDTH)
        .unwrap();
    stage.add_child(parent, child).unwrap();
    stage.flush_relayout();

    // The fit↔fill pair cannot settle; the child contributes its natural
    // width and the condition is diagnosed.
    assert_eq!(stage.reported_size(parent).width, 25.0);
    let diagnostics = stage.take_layout_diagnostics();
    assert!(diagnostics
        .iter()
        .any(|d| matches!(d, LayoutError::CyclicDependency { .. })));
}

#[test]
fn limits_clamp_every_policy() {
    let mut stage = MemoryStage::with_viewport(Size::new(480.0, 800.0));
    let parent = stage.create_actor();
    stage
        .set_resize_policy(parent, ResizePolicy::Fixed, Axes::ALL)
        .unwrap();
    stage.set_explicit_size(parent, Size::new(150.0, 100.0)).unwrap();
    let child = stage.create_actor();
    stage
        .set_resize_policy(child, ResizePolicy::FillToParent, Axes::ALL)
        .unwrap();
    stage
        .set_size_limit(child, SizeLimit::new(0.0, 100.0), Axes::WIDTH)
        .unwrap();
    stage
        .set_size_limit(child, SizeLimit::new(120.0, f32::INFINITY), Axes::HEIGHT)
        .unwrap();
    stage.add_child(parent, child).unwrap();
    stage.flush_relayout();

    assert_eq!(stage.reported_size(child), Size::new(100.0, 120.0));
}

#[test]
fn clamped_child_extent_feeds_the_parent_fit() {
    let mut stage = MemoryStage::with_viewport(Size::new(480.0, 800.0));
    let parent = stage.create_actor();
    stage
        .set_resize_policy(parent, ResizePolicy::FitToChildren, Axes::ALL)
        .unwrap();
    let child = stage.create_actor();
    stage
        .set_resize_policy(child, ResizePolicy::Fixed, Axes::ALL)
        .unwrap();
    stage.set_explicit_size(child, Size::new(300.0, 300.0)).unwrap();
    stage
        .set_size_limit(child, SizeLimit::new(0.0, 60.0), Axes::ALL)
        .unwrap();
    stage.add_child(parent, child).unwrap();
    stage.flush_relayout();

    assert_eq!(stage.reported_size(child), Size::new(60.0, 60.0));
    assert_eq!(stage.reported_size(parent), Size::new(60.0, 60.0));
}

#[test]
fn fit_parent_wraps_a_derived_child_axis() {
    let mut stage = MemoryStage::with_viewport(Size::new(480.0, 800.0));
    let parent = stage.create_actor();
    stage
        .set_resize_policy(parent, ResizePolicy::FitToChildren, Axes::ALL)
        .unwrap();
    let child = stage.create_actor_with_delegate(Rc::new(AspectRatio {
        natural: Size::new(50.0, 20.0),
        height_per_width: 0.5,
        width_per_height: 2.0,
    }));
    stage
        .set_resize_policy(child, ResizePolicy::DimensionDependency, Axes::HEIGHT)
        .unwrap();
    stage.add_child(parent, child).unwrap();
    stage.flush_relayout();

    // Child width is natural (50), height derives as 0.5 · 50 = 25; the
    // parent wraps both.
    assert_eq!(stage.reported_size(child), Size::new(50.0, 25.0));
    assert_eq!(stage.reported_size(parent), Size::new(50.0, 25.0));

    for id in [parent, child] {
        let state = stage.layout_state(id).unwrap();
        assert!(!state.is_dirty(Axis::Width));
        assert!(!state.is_dirty(Axis::Height));
    }
}
