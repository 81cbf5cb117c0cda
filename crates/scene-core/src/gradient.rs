use glam::Vec3;

use crate::geometry::Geometry;
use crate::palette::ColorStops;

/// Scalar each vertex is ranked by when colouring a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientAxis {
    X,
    Y,
    Z,
    /// Distance from the local origin.
    Radial,
}

impl GradientAxis {
    #[inline]
    pub fn value(self, p: Vec3) -> f32 {
        match self {
            GradientAxis::X => p.x,
            GradientAxis::Y => p.y,
            GradientAxis::Z => p.z,
            GradientAxis::Radial => p.length(),
        }
    }
}

/// Evenly spaced stops; `t` outside `[0, 1]` clamps to the end stops.
pub fn sample_stops(stops: &ColorStops, t: f32) -> Vec3 {
    let segments = (stops.len() - 1) as f32;
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * segments;
    let i = (scaled.floor() as usize).min(stops.len() - 2);
    let local = scaled - i as f32;
    stops[i].lerp(stops[i + 1], local)
}

/// Fill `geometry.colors` by ranking every vertex along `axis` and sampling
/// `stops` at its normalized position.
pub fn apply_vertex_gradient(geometry: &mut Geometry, axis: GradientAxis, stops: &ColorStops) {
    let values: Vec<f32> = geometry.positions.iter().map(|p| axis.value(*p)).collect();
    let (lo, hi) = values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let range = hi - lo;
    geometry.colors = values
        .iter()
        .map(|v| {
            let t = if range > f32::EPSILON {
                (v - lo) / range
            } else {
                0.0
            };
            sample_stops(stops, t)
        })
        .collect();
}
