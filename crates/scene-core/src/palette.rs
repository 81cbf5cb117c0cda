use glam::Vec3;

use crate::material::Theme;
use crate::shape::ShapeMap;

/// Four ordered gradient stops for one shape, in linear RGB.
pub type ColorStops = [Vec3; 4];

/// One [`ColorStops`] ramp per shape.
pub type GradientPalette = ShapeMap<ColorStops>;

#[inline]
fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` sRGB to linear RGB.
pub fn hex(rgb: u32) -> Vec3 {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    Vec3::new(
        srgb_channel_to_linear(r),
        srgb_channel_to_linear(g),
        srgb_channel_to_linear(b),
    )
}

fn ramp(stops: [u32; 4]) -> ColorStops {
    stops.map(hex)
}

/// Light theme preset: saturated ramps, rendered unlit.
pub fn light() -> GradientPalette {
    ShapeMap::new([
        ramp([0xff6b4a, 0xff9a3c, 0xffc94d, 0xfff0a8]),
        ramp([0x3d5afe, 0x5c7cfa, 0x8fb3ff, 0xd0e1ff]),
        ramp([0xf06595, 0xf783ac, 0xfaa2c1, 0xffdeeb]),
        ramp([0x12b886, 0x38d9a9, 0x63e6be, 0xc3fae8]),
        ramp([0x7048e8, 0x845ef7, 0xb197fc, 0xe5dbff]),
        ramp([0xfa5252, 0xff8787, 0xffa8a8, 0xffe3e3]),
    ])
}

/// Dark theme preset. Only the physical skin is visible in dark mode, so these
/// ramps matter when a consumer flips back to the flat skin mid-transition.
pub fn dark() -> GradientPalette {
    ShapeMap::new([
        ramp([0x2b1a14, 0x5a2e1f, 0x8c4a2f, 0xc2724a]),
        ramp([0x10163a, 0x1d2a6b, 0x2f45a3, 0x4f6bd6]),
        ramp([0x2a1020, 0x52203c, 0x82325c, 0xb34d80]),
        ramp([0x0a2a22, 0x145240, 0x1f7a60, 0x33a386]),
        ramp([0x1a1236, 0x2f2066, 0x4a3499, 0x6d52c7]),
        ramp([0x2e0f0f, 0x5c1d1d, 0x8f2e2e, 0xc24444]),
    ])
}

/// Muted ramps used behind the navigation overlay.
pub fn menu_overlay() -> GradientPalette {
    let stops = ramp([0x1f2430, 0x3a4254, 0x5c667d, 0x8891a8]);
    ShapeMap::splat(stops)
}

/// Preset matching a theme.
pub fn for_theme(theme: Theme) -> GradientPalette {
    match theme {
        Theme::Light => light(),
        Theme::Dark => dark(),
    }
}
