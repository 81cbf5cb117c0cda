//! CPU-side indexed geometry and the tube/cap/sphere builders the signature
//! shapes are made of.
//!
//! Tubes are swept along a sampled curve using parallel-transport frames, so
//! the cross-section never flips on the planar arcs and waves used here. Open
//! tube ends are closed with hemispheres oriented along the curve tangent at
//! that end, which makes a cap read as a rounded continuation of the tube.

use glam::{Quat, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Which optional attributes a geometry carries. Merging requires equal layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    pub normals: bool,
    pub uvs: bool,
    pub colors: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("cannot merge geometries with different vertex layouts: {expected:?} vs {found:?}")]
    IncompatibleAttributes {
        expected: VertexLayout,
        found: VertexLayout,
    },
    #[error("nothing to merge")]
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub colors: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub bounding_box: Option<Aabb>,
    pub bounding_sphere: Option<BoundingSphere>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn layout(&self) -> VertexLayout {
        let n = self.positions.len();
        VertexLayout {
            normals: n > 0 && self.normals.len() == n,
            uvs: n > 0 && self.uvs.len() == n,
            colors: n > 0 && self.colors.len() == n,
        }
    }

    pub fn compute_bounds(&mut self) {
        let Some(first) = self.positions.first().copied() else {
            self.bounding_box = None;
            self.bounding_sphere = None;
            return;
        };
        let (min, max) = self
            .positions
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        let aabb = Aabb { min, max };
        let center = aabb.center();
        let radius = self
            .positions
            .iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0f32, f32::max)
            .sqrt();
        self.bounding_box = Some(aabb);
        self.bounding_sphere = Some(BoundingSphere { center, radius });
    }

    /// Interleave for upload. Missing colors default to white, missing
    /// normals to +Z.
    pub fn vertices(&self) -> Vec<ShapeVertex> {
        let layout = self.layout();
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| ShapeVertex {
                position: p.to_array(),
                normal: if layout.normals {
                    self.normals[i].to_array()
                } else {
                    Vec3::Z.to_array()
                },
                color: if layout.colors {
                    self.colors[i].to_array()
                } else {
                    Vec3::ONE.to_array()
                },
            })
            .collect()
    }
}

/// Concatenate geometries into shared vertex/index buffers.
pub fn merge(parts: &[Geometry]) -> Result<Geometry, GeometryError> {
    let first = parts.first().ok_or(GeometryError::Empty)?;
    let expected = first.layout();
    for part in &parts[1..] {
        let found = part.layout();
        if found != expected {
            return Err(GeometryError::IncompatibleAttributes { expected, found });
        }
    }
    let mut out = Geometry::default();
    for part in parts {
        let base = out.positions.len() as u32;
        out.positions.extend_from_slice(&part.positions);
        if expected.normals {
            out.normals.extend_from_slice(&part.normals);
        }
        if expected.uvs {
            out.uvs.extend_from_slice(&part.uvs);
        }
        if expected.colors {
            out.colors.extend_from_slice(&part.colors);
        }
        out.indices.extend(part.indices.iter().map(|i| i + base));
    }
    out.compute_bounds();
    Ok(out)
}

fn any_perpendicular(v: Vec3) -> Vec3 {
    let axis = if v.z.abs() < 0.9 { Vec3::Z } else { Vec3::X };
    v.cross(axis).normalize()
}

fn grid_indices(indices: &mut Vec<u32>, base: u32, rows: usize, cols: usize) {
    let stride = cols as u32 + 1;
    for i in 0..rows as u32 {
        for j in 0..cols as u32 {
            let a = base + i * stride + j;
            let b = base + (i + 1) * stride + j;
            let c = base + (i + 1) * stride + j + 1;
            let d = base + i * stride + j + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}

/// Tangents of a sampled polyline (central differences, one-sided at the ends).
pub fn curve_tangents(points: &[Vec3]) -> Vec<Vec3> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(n - 1)];
            (next - prev).normalize_or_zero()
        })
        .collect()
}

/// Sweep a circle of `radius` along `points`.
pub fn tube(points: &[Vec3], radius: f32, radial_segments: usize) -> Geometry {
    let mut g = Geometry::default();
    if points.len() < 2 || radial_segments < 3 {
        return g;
    }
    let tangents = curve_tangents(points);
    let mut normal = any_perpendicular(tangents[0]);
    let last = points.len() - 1;
    for (i, (p, t)) in points.iter().zip(&tangents).enumerate() {
        if i > 0 {
            let turn = Quat::from_rotation_arc(tangents[i - 1], *t);
            normal = (turn * normal).normalize();
        }
        let binormal = t.cross(normal).normalize();
        for j in 0..=radial_segments {
            let phi = j as f32 / radial_segments as f32 * TAU;
            let dir = normal * phi.cos() + binormal * phi.sin();
            g.positions.push(*p + dir * radius);
            g.normals.push(dir);
            g.uvs.push(Vec2::new(
                i as f32 / last as f32,
                j as f32 / radial_segments as f32,
            ));
        }
    }
    grid_indices(&mut g.indices, 0, last, radial_segments);
    g.compute_bounds();
    g
}

/// Hemisphere of `radius` centred at `center`, bulging toward `direction`.
pub fn hemisphere_cap(center: Vec3, direction: Vec3, radius: f32, segments: usize) -> Geometry {
    let mut g = Geometry::default();
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO || segments < 2 {
        return g;
    }
    let orient = Quat::from_rotation_arc(Vec3::Z, dir);
    let rings = segments;
    let sectors = segments * 2;
    for k in 0..=rings {
        let lat = k as f32 / rings as f32 * FRAC_PI_2;
        for j in 0..=sectors {
            let lon = j as f32 / sectors as f32 * TAU;
            let local = Vec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin());
            let n = orient * local;
            g.positions.push(center + n * radius);
            g.normals.push(n);
            g.uvs.push(Vec2::new(j as f32 / sectors as f32, k as f32 / rings as f32));
        }
    }
    grid_indices(&mut g.indices, 0, rings, sectors);
    g.compute_bounds();
    g
}

/// Tube along `points` with hemispherical caps at both ends. Falls back to the
/// bare tube if the pieces cannot be merged.
pub fn capped_tube(
    points: &[Vec3],
    radius: f32,
    radial_segments: usize,
    cap_segments: usize,
) -> Geometry {
    let body = tube(points, radius, radial_segments);
    if points.len() < 2 {
        return body;
    }
    let tangents = curve_tangents(points);
    let last = points.len() - 1;
    let start_cap = hemisphere_cap(points[0], -tangents[0], radius, cap_segments);
    let end_cap = hemisphere_cap(points[last], tangents[last], radius, cap_segments);
    match merge(&[body.clone(), start_cap, end_cap]) {
        Ok(merged) => merged,
        Err(e) => {
            log::warn!("[geometry] cap merge failed, using open tube: {e}");
            body
        }
    }
}

/// Points on a circular arc of `sweep` radians in the XY plane, centred so the
/// arc is symmetric about +Y.
pub fn arc_points(radius: f32, sweep: f32, segments: usize) -> Vec<Vec3> {
    let start = FRAC_PI_2 - sweep * 0.5;
    (0..=segments)
        .map(|i| {
            let theta = start + sweep * i as f32 / segments as f32;
            Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
        })
        .collect()
}

/// Horizontal sinusoid centred on the origin.
pub fn wave_points(amplitude: f32, length: f32, periods: f32, segments: usize) -> Vec<Vec3> {
    (0..=segments)
        .map(|i| {
            let u = i as f32 / segments as f32;
            let x = (u - 0.5) * length;
            let y = amplitude * (u * periods * TAU).sin();
            Vec3::new(x, y, 0.0)
        })
        .collect()
}

pub fn uv_sphere(radius: f32, width_segments: usize, height_segments: usize) -> Geometry {
    let mut g = Geometry::default();
    for k in 0..=height_segments {
        let v = k as f32 / height_segments as f32;
        let theta = v * PI;
        for j in 0..=width_segments {
            let u = j as f32 / width_segments as f32;
            let phi = u * TAU;
            let n = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            g.positions.push(n * radius);
            g.normals.push(n);
            g.uvs.push(Vec2::new(u, 1.0 - v));
        }
    }
    grid_indices(&mut g.indices, 0, height_segments, width_segments);
    g.compute_bounds();
    g
}
