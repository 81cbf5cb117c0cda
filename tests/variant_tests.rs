// Host-side tests for the variant table, responsive layout and the wire
// format of transforms and partial updates.

mod common;

use glam::Vec3;
use scene_core::variant::responsive_fit;
use scene_core::{
    create_responsive_variant_state, create_variant_state, variant_template, ShapeId,
    ShapeTransform, StateUpdate, VariantName, VariantState, DEFAULT_BREAKPOINT_HEIGHT,
    DEFAULT_BREAKPOINT_WIDTH, RESPONSIVE_MIN_FIT,
};

const BW: f32 = DEFAULT_BREAKPOINT_WIDTH;
const BH: f32 = DEFAULT_BREAKPOINT_HEIGHT;

#[test]
fn every_variant_covers_all_shapes_with_finite_values() {
    for name in VariantName::ALL {
        let variant = variant_template(name);
        assert_eq!(variant.iter().count(), ShapeId::COUNT);
        for (id, tr) in variant.iter() {
            assert!(tr.is_valid(), "{name:?}/{id:?} has an invalid transform: {tr:?}");
        }
    }
}

#[test]
fn variant_copies_are_isolated_from_the_template() {
    let template = variant_template(VariantName::Home);
    let before = *template;
    let mut copy = create_variant_state(template);
    copy[ShapeId::Sphere].position = Vec3::splat(99.0);
    copy[ShapeId::Wave].scale = Vec3::splat(7.0);
    assert_eq!(*variant_template(VariantName::Home), before);
    assert_ne!(copy, before);
}

#[test]
fn responsive_variant_is_pure() {
    let template = variant_template(VariantName::Work);
    let a = create_responsive_variant_state(template, 390.0, 844.0, BW, BH);
    let b = create_responsive_variant_state(template, 390.0, 844.0, BW, BH);
    assert_eq!(a, b);
}

#[test]
fn degenerate_viewport_returns_template_unchanged() {
    let template = variant_template(VariantName::About);
    for (w, h) in [(0.0, 800.0), (1280.0, 0.0), (0.0, 0.0), (f32::NAN, 500.0)] {
        let out = create_responsive_variant_state(template, w, h, BW, BH);
        assert_eq!(&out, template, "viewport {w}x{h}");
        assert!(out.all_valid());
    }
}

#[test]
fn wide_viewport_keeps_template_layout() {
    let template = variant_template(VariantName::Home);
    let out = create_responsive_variant_state(template, 1920.0, 1080.0, BW, BH);
    assert_eq!(&out, template);
}

#[test]
fn narrow_viewport_pulls_shapes_inward_and_shrinks_them() {
    let template = variant_template(VariantName::Home);
    let out = create_responsive_variant_state(template, 390.0, 844.0, BW, BH);
    for (id, tr) in out.iter() {
        let src = template[id];
        assert!(tr.position.x.abs() <= src.position.x.abs() + 1e-6, "{id:?}");
        assert!(tr.position.y.abs() <= src.position.y.abs() + 1e-6, "{id:?}");
        assert!(tr.scale.x < src.scale.x, "{id:?}");
        assert!(tr.scale.x > 0.0);
        assert_eq!(tr.position.z, src.position.z);
        assert_eq!(tr.rotation, src.rotation);
    }
}

#[test]
fn responsive_fit_is_clamped() {
    assert_eq!(responsive_fit(1280.0, 800.0, BW, BH), Some(1.0));
    assert_eq!(responsive_fit(100.0, 2000.0, BW, BH), Some(RESPONSIVE_MIN_FIT));
    assert_eq!(responsive_fit(0.0, 800.0, BW, BH), None);
    let fit = responsive_fit(960.0, 800.0, BW, BH).unwrap_or_default();
    assert!((fit - 0.75).abs() < 1e-6);
}

#[test]
fn transform_scale_accepts_scalar_or_vector() {
    let scalar: ShapeTransform =
        serde_json::from_str(r#"{"position":[1,2,3],"rotation":[0,0,0.5],"scale":1.5}"#)
            .expect("scalar scale");
    assert_eq!(scalar.scale, Vec3::splat(1.5));
    assert_eq!(scalar.position, Vec3::new(1.0, 2.0, 3.0));

    let vector: ShapeTransform =
        serde_json::from_str(r#"{"position":[0,0,0],"rotation":[0,0,0],"scale":[1,2,3]}"#)
            .expect("vector scale");
    assert_eq!(vector.scale, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn variant_state_requires_every_shape() {
    let json = serde_json::to_string(variant_template(VariantName::Contact)).expect("serialize");
    let back: VariantState = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(&back, variant_template(VariantName::Contact));

    let partial = r#"{"sphere":{"position":[0,0,0],"rotation":[0,0,0],"scale":1}}"#;
    assert!(serde_json::from_str::<VariantState>(partial).is_err());
}

#[test]
fn invalid_transforms_are_sanitized() {
    let bad = ShapeTransform {
        position: Vec3::new(f32::NAN, 1.0, f32::INFINITY),
        rotation: Vec3::ZERO,
        scale: Vec3::new(-1.0, 0.0, 2.0),
    };
    assert!(!bad.is_valid());
    let fixed = bad.sanitized();
    assert!(fixed.is_valid());
    assert_eq!(fixed.position, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(fixed.scale.z, 2.0);
}

#[test]
fn partial_update_distinguishes_null_from_absent_transition() {
    let absent: StateUpdate = serde_json::from_str(r#"{"opacity":0.5}"#).expect("absent");
    assert_eq!(absent.variant_transition_ms, None);
    assert_eq!(absent.opacity, Some(0.5));

    let null: StateUpdate =
        serde_json::from_str(r#"{"variantTransitionMs":null}"#).expect("null");
    assert_eq!(null.variant_transition_ms, Some(None));

    let set: StateUpdate =
        serde_json::from_str(r#"{"variantTransitionMs":600,"variantName":"work"}"#).expect("set");
    assert_eq!(set.variant_transition_ms, Some(Some(600.0)));
    assert_eq!(set.variant_name, Some(VariantName::Work));
}

#[test]
fn pointers_cross_the_wire_as_xy_objects() {
    let update: StateUpdate =
        serde_json::from_str(r#"{"manualPointer":{"x":0.2,"y":0.1}}"#).expect("xy pointer");
    assert_eq!(update.manual_pointer, Some(glam::Vec2::new(0.2, 0.1)));

    let json = serde_json::to_value(&update).expect("serialize");
    assert_eq!(json["manualPointer"]["x"].as_f64(), Some(0.2f32 as f64));
    assert_eq!(json["manualPointer"]["y"].as_f64(), Some(0.1f32 as f64));

    assert!(serde_json::from_str::<StateUpdate>(r#"{"manualPointer":[0.2,0.1]}"#).is_err());
    let empty: StateUpdate = serde_json::from_str("{}").expect("absent pointer");
    assert_eq!(empty.manual_pointer, None);
}

#[test]
fn snapshot_pointers_serialize_as_xy_objects() {
    let c = common::controller();
    let json = serde_json::to_value(c.state()).expect("serialize");
    assert_eq!(json["pointer"]["x"].as_f64(), Some(0.0));
    assert_eq!(json["manualPointer"]["y"].as_f64(), Some(0.0));

    let back: scene_core::SceneState = serde_json::from_value(json).expect("deserialize");
    assert_eq!(&back, c.state());
}
