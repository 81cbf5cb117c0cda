//! Geometry factory for the six signature shapes.

use std::f32::consts::PI;

use crate::constants::*;
use crate::geometry::{arc_points, capped_tube, uv_sphere, wave_points, Geometry};
use crate::gradient::{apply_vertex_gradient, GradientAxis};
use crate::palette::ColorStops;
use crate::shape::ShapeId;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    /// Capped tube along a circular arc of `sweep` radians.
    PartialTorus { sweep: f32 },
    Wave { amplitude: f32, length: f32, periods: f32 },
    Sphere { radius: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub axis: GradientAxis,
}

pub fn shape_spec(id: ShapeId) -> ShapeSpec {
    let torus_270 = ShapeKind::PartialTorus { sweep: 1.5 * PI };
    let semi = ShapeKind::PartialTorus { sweep: PI };
    match id {
        ShapeId::Torus270A => ShapeSpec {
            kind: torus_270,
            axis: GradientAxis::Y,
        },
        ShapeId::Torus270B => ShapeSpec {
            kind: torus_270,
            axis: GradientAxis::X,
        },
        ShapeId::SemiA => ShapeSpec {
            kind: semi,
            axis: GradientAxis::Y,
        },
        ShapeId::SemiB => ShapeSpec {
            kind: semi,
            axis: GradientAxis::Radial,
        },
        ShapeId::Wave => ShapeSpec {
            kind: ShapeKind::Wave {
                amplitude: WAVE_AMPLITUDE,
                length: WAVE_LENGTH,
                periods: WAVE_PERIODS,
            },
            axis: GradientAxis::X,
        },
        ShapeId::Sphere => ShapeSpec {
            kind: ShapeKind::Sphere {
                radius: SPHERE_RADIUS,
            },
            axis: GradientAxis::Y,
        },
    }
}

/// Uncoloured geometry for a shape kind.
pub fn build_kind(kind: ShapeKind) -> Geometry {
    match kind {
        ShapeKind::PartialTorus { sweep } => {
            let points = arc_points(ARC_RADIUS, sweep, TUBULAR_SEGMENTS);
            capped_tube(&points, TUBE_RADIUS, RADIAL_SEGMENTS, CAP_SEGMENTS)
        }
        ShapeKind::Wave {
            amplitude,
            length,
            periods,
        } => {
            let points = wave_points(amplitude, length, periods, TUBULAR_SEGMENTS);
            capped_tube(&points, TUBE_RADIUS, RADIAL_SEGMENTS, CAP_SEGMENTS)
        }
        ShapeKind::Sphere { radius } => {
            uv_sphere(radius, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS)
        }
    }
}

/// Geometry for `id` with its gradient colours filled in from `stops`.
pub fn build_shape_geometry(id: ShapeId, stops: &ColorStops) -> Geometry {
    let spec = shape_spec(id);
    let mut geometry = build_kind(spec.kind);
    apply_vertex_gradient(&mut geometry, spec.axis, stops);
    geometry.compute_bounds();
    geometry
}
