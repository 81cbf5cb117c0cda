// Host-side tests for the shape bundle: theme skins, opacity and teardown.

mod common;

use common::RecordingRenderer;
use scene_core::material::SkinKind;
use scene_core::palette;
use scene_core::{MaterialSkin, ShapeBundle, ShapeId, ShapeMap, Theme};
use std::collections::HashSet;

fn bundle(theme: Theme) -> ShapeBundle {
    ShapeBundle::new(&palette::for_theme(theme), theme, 1.0)
}

#[test]
fn upload_sends_every_shape_once() {
    let b = bundle(Theme::Light);
    let mut r = RecordingRenderer::default();
    b.upload(&mut r).expect("upload");
    assert_eq!(r.uploads, ShapeId::ALL.to_vec());
    for (_, mesh) in b.meshes().iter() {
        assert!(!mesh.frustum_culled);
        assert_eq!(mesh.geometry.colors.len(), mesh.geometry.vertex_count());
    }
}

#[test]
fn theme_selects_skin_and_keeps_opacity() {
    let mut b = bundle(Theme::Light);
    b.set_opacities(&ShapeMap::from_fn(|_| 0.4));
    for (_, mesh) in b.meshes().iter() {
        assert!(matches!(mesh.materials.active(), MaterialSkin::Flat(_)));
    }

    b.apply_theme(Theme::Dark);
    assert_eq!(b.theme(), Theme::Dark);
    for (_, mesh) in b.meshes().iter() {
        let skin = mesh.materials.active();
        assert!(matches!(skin, MaterialSkin::Physical(_)));
        assert_eq!(skin.opacity(), 0.4);
        assert!(skin.transparent());
    }

    b.apply_theme(Theme::Light);
    let sphere = b.mesh(ShapeId::Sphere).materials;
    assert_eq!(sphere.active_kind(), SkinKind::Flat);
    assert_eq!(sphere.active().opacity(), 0.4);
}

#[test]
fn theme_round_trip_restores_physical_tuning() {
    let mut b = bundle(Theme::Dark);
    let before = b.mesh(ShapeId::Wave).materials.physical;
    b.apply_theme(Theme::Light);
    b.apply_theme(Theme::Dark);
    assert_eq!(b.mesh(ShapeId::Wave).materials.physical, before);
}

#[test]
fn full_opacity_is_opaque() {
    let mut b = bundle(Theme::Light);
    let mut opacities = ShapeMap::from_fn(|_| 1.0);
    opacities[ShapeId::SemiA] = 0.0;
    b.set_opacities(&opacities);
    assert!(b.mesh(ShapeId::SemiA).materials.active().transparent());
    assert!(!b.mesh(ShapeId::SemiB).materials.active().transparent());
}

#[test]
fn brightness_scales_lights() {
    let mut b = bundle(Theme::Dark);
    let dim = *b.lights().expect("lights");
    b.set_brightness(2.0);
    let bright = *b.lights().expect("lights");
    assert!(bright.key.intensity > dim.key.intensity);
    assert_eq!(b.brightness(), 2.0);
}

#[test]
fn palette_swap_recolours_and_reuploads() {
    let mut b = bundle(Theme::Light);
    let mut r = RecordingRenderer::default();
    let dark = palette::dark();
    b.apply_palette(&dark, &mut r).expect("palette");
    assert_eq!(r.uploads.len(), ShapeId::COUNT);
    assert_eq!(b.palette(), &dark);
    let wave = b.mesh(ShapeId::Wave);
    assert!(wave
        .geometry
        .colors
        .iter()
        .any(|c| c.abs_diff_eq(dark[ShapeId::Wave][0], 1e-5)));
}

#[test]
fn dispose_releases_each_resource_exactly_once() {
    let mut b = bundle(Theme::Dark);
    let mut r = RecordingRenderer::default();
    b.dispose(&mut r);
    b.dispose(&mut r);

    assert!(b.is_disposed());
    assert!(b.lights().is_none());
    assert_eq!(r.released_meshes.len(), ShapeId::COUNT);
    assert_eq!(r.lights_released, 1);

    let unique: HashSet<_> = r.released_materials.iter().copied().collect();
    assert_eq!(r.released_materials.len(), ShapeId::COUNT * 2);
    assert_eq!(unique.len(), r.released_materials.len());
}
