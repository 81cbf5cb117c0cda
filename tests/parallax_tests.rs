// Host-side tests for pointer normalization, group motion and the camera.

use glam::Vec2;
use scene_core::interpolation::damp_factor;
use scene_core::parallax::{group_motion, normalize_pointer, MotionInputs, PointerTracker};
use scene_core::{OrthoCamera, PointerDriver, FRUSTUM_HALF_HEIGHT, GROUP_BOUND_FRACTION};

fn inputs(pointer: Vec2, parallax: bool) -> MotionInputs {
    MotionInputs {
        pointer,
        elapsed_sec: 0.0,
        hover_level: 0.0,
        cursor_boost: 0.0,
        parallax,
        half_extents: Vec2::new(8.0, 5.0),
    }
}

#[test]
fn pointer_corners_map_to_unit_square() {
    let origin = Vec2::new(100.0, 50.0);
    let size = Vec2::new(400.0, 200.0);
    assert_eq!(normalize_pointer(origin, origin, size), Vec2::new(-1.0, 1.0));
    assert_eq!(
        normalize_pointer(origin + size, origin, size),
        Vec2::new(1.0, -1.0)
    );
    assert_eq!(
        normalize_pointer(origin + size * 0.5, origin, size),
        Vec2::ZERO
    );
    // Outside the rect clamps.
    assert_eq!(
        normalize_pointer(Vec2::new(-1000.0, 9000.0), origin, size),
        Vec2::new(-1.0, -1.0)
    );
}

#[test]
fn zero_sized_rect_maps_to_centre() {
    let p = normalize_pointer(Vec2::new(30.0, 40.0), Vec2::ZERO, Vec2::new(0.0, 100.0));
    assert_eq!(p, Vec2::ZERO);
}

#[test]
fn group_shift_stays_inside_view_bound() {
    let mut i = inputs(Vec2::new(1.0, -1.0), true);
    i.cursor_boost = 1.0;
    i.half_extents = Vec2::new(1.0, 1.0);
    let g = group_motion(&i);
    let bound = i.half_extents * GROUP_BOUND_FRACTION;
    assert!(g.position.x.abs() <= bound.x + 1e-6);
    assert!(g.position.y.abs() <= bound.y + 1e-6);
    assert_eq!(g.position.z, 0.0);
}

#[test]
fn parallax_off_ignores_pointer() {
    let still = group_motion(&inputs(Vec2::ZERO, false));
    let moved = group_motion(&inputs(Vec2::new(0.8, 0.6), false));
    assert_eq!(still, moved);
    let on = group_motion(&inputs(Vec2::new(0.8, 0.6), true));
    assert!(on.rotation.y > 0.0);
    assert!(on.position.x > 0.0);
}

#[test]
fn hover_grows_the_group() {
    let mut i = inputs(Vec2::ZERO, true);
    let rest = group_motion(&i).scale;
    i.hover_level = 1.0;
    assert!(group_motion(&i).scale > rest);
}

#[test]
fn tracker_follows_selected_driver() {
    let mut t = PointerTracker {
        device_target: Vec2::new(1.0, 0.0),
        manual_target: Vec2::new(0.0, -1.0),
        ..Default::default()
    };
    for _ in 0..240 {
        t.step(PointerDriver::Manual, true, 1.0 / 60.0);
    }
    assert!(t.tracked.abs_diff_eq(Vec2::new(0.0, -1.0), 1e-3));
    assert!((t.hover_level - 1.0).abs() < 1e-3);

    let before = t;
    t.step(PointerDriver::Device, true, 0.0);
    assert_eq!(t, before);
}

#[test]
fn damp_factor_is_a_fraction() {
    assert_eq!(damp_factor(3.2, 0.0), 0.0);
    assert_eq!(damp_factor(3.2, -1.0), 0.0);
    assert_eq!(damp_factor(3.2, f32::NAN), 0.0);
    for dt in [1.0 / 240.0, 1.0 / 60.0, 0.5, 30.0] {
        let k = damp_factor(3.2, dt);
        assert!((0.0..=1.0).contains(&k), "dt {dt}: {k}");
    }
    assert!(damp_factor(3.2, 1.0 / 30.0) > damp_factor(3.2, 1.0 / 60.0));
}

#[test]
fn camera_follows_aspect_with_fixed_height() {
    let mut cam = OrthoCamera::new(1600.0, 800.0);
    assert!((cam.aspect() - 2.0).abs() < 1e-6);
    assert_eq!(cam.top, FRUSTUM_HALF_HEIGHT);
    assert_eq!(cam.half_extents(), Vec2::new(2.0 * FRUSTUM_HALF_HEIGHT, FRUSTUM_HALF_HEIGHT));

    cam.set_viewport(0.0, 800.0);
    assert!((cam.aspect() - 2.0).abs() < 1e-6);

    cam.set_viewport(400.0, 800.0);
    assert!((cam.aspect() - 0.5).abs() < 1e-6);
    assert!(cam.view_projection().is_finite());
}
