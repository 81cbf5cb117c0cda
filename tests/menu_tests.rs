// Host-side tests for the menu hover-forward effect.

mod common;

use common::{controller, record_state_changes};
use scene_core::{ForwardOffset, HoverForward, ShapeId, VariantName};

#[test]
fn hover_pushes_targets_and_dims_the_rest() {
    let mut c = controller();
    let before = c.get_state();
    let mut hover = HoverForward::new();
    let offset = ForwardOffset::default();

    assert!(hover.enter_on(&mut c, &[ShapeId::Sphere], offset));
    assert!(hover.is_active());
    let state = c.state();
    let sphere = state.variant[ShapeId::Sphere];
    assert_eq!(
        sphere.position,
        before.variant[ShapeId::Sphere].position + offset.position
    );
    assert_eq!(state.shape_opacity[ShapeId::Sphere], 1.0);
    assert_eq!(state.shape_opacity[ShapeId::Wave], offset.dim_opacity);
    assert_eq!(state.variant[ShapeId::Wave], before.variant[ShapeId::Wave]);
}

#[test]
fn restore_returns_the_exact_capture() {
    let mut c = controller();
    let before = c.get_state();
    let mut hover = HoverForward::new();

    hover.enter_on(&mut c, &[ShapeId::Torus270A], ForwardOffset::default());
    hover.enter_on(&mut c, &[ShapeId::SemiB], ForwardOffset::default());
    hover.enter_on(&mut c, &[ShapeId::Torus270A], ForwardOffset::default());
    assert!(hover.exit_on(&mut c));

    let after = c.get_state();
    assert_eq!(after.variant, before.variant);
    assert_eq!(after.shape_opacity, before.shape_opacity);
    assert!(!hover.is_active());
}

#[test]
fn moving_between_items_does_not_stack_offsets() {
    let mut c = controller();
    let base = c.state().variant[ShapeId::Wave];
    let mut hover = HoverForward::new();
    let offset = ForwardOffset::default();

    hover.enter_on(&mut c, &[ShapeId::Wave], offset);
    hover.enter_on(&mut c, &[ShapeId::Wave, ShapeId::Sphere], offset);
    let wave = c.state().variant[ShapeId::Wave];
    assert_eq!(wave.position, base.position + offset.position);
    assert_eq!(wave.rotation, base.rotation + offset.rotation);
}

#[test]
fn exit_without_enter_is_a_no_op() {
    let mut c = controller();
    let seen = record_state_changes(&mut c);
    let mut hover = HoverForward::new();
    assert!(hover.exit().is_none());
    assert!(!hover.exit_on(&mut c));
    assert!(seen.borrow().is_empty());
}

#[test]
fn forget_drops_the_capture() {
    let mut c = controller();
    let mut hover = HoverForward::new();
    hover.enter_on(&mut c, &[ShapeId::SemiA], ForwardOffset::default());
    c.set_state(scene_core::StateUpdate {
        variant_name: Some(VariantName::Work),
        ..Default::default()
    });
    hover.forget();
    assert!(hover.exit().is_none());
    assert_eq!(c.state().variant_name, VariantName::Work);
}

#[test]
fn offset_deserializes_with_defaults() {
    let offset: ForwardOffset = serde_json::from_str(r#"{"dimOpacity":0.1}"#).expect("offset");
    assert_eq!(offset.dim_opacity, 0.1);
    assert_eq!(offset.position, ForwardOffset::default().position);
}

#[test]
fn overlay_palette_survives_theme_changes() {
    let overlay = scene_core::palette::menu_overlay();
    let mut c = common::controller_with(scene_core::SceneOptions {
        palette: Some(overlay),
        ..Default::default()
    });
    c.set_state(scene_core::StateUpdate {
        theme: Some(scene_core::Theme::Dark),
        ..Default::default()
    });
    assert_eq!(c.state().palette, overlay);
    assert_eq!(c.bundle().palette(), &overlay);
}
