//! Frame-rate independent exponential smoothing.
//!
//! A step of `dt` seconds moves a value by `1 - e^(-rate * dt)` of its
//! remaining distance. Chaining steps multiplies the remainders, so the total
//! progress after `T` seconds is `1 - e^(-rate * T)` whatever the frame rate,
//! and the factor never leaves `[0, 1]`, so nothing overshoots.

use crate::constants::{TRANSITION_CONVERGENCE, VARIANT_LERP_RATE, VARIANT_LERP_RATE_HOVERED};
use crate::shape::ShapeTransform;
use crate::variant::VariantState;

/// Blend factor for a step of `dt_sec` at `rate` per second.
#[inline]
pub fn damp_factor(rate: f32, dt_sec: f32) -> f32 {
    if !(dt_sec > 0.0) || !(rate > 0.0) {
        return 0.0;
    }
    (1.0 - (-rate * dt_sec).exp()).clamp(0.0, 1.0)
}

/// Rate that covers [`TRANSITION_CONVERGENCE`] of the distance in
/// `duration_ms`: `-ln(1 - c) / duration`.
#[inline]
pub fn transition_rate(duration_ms: f32) -> f32 {
    let duration_sec = duration_ms / 1000.0;
    -(1.0 - TRANSITION_CONVERGENCE).ln() / duration_sec
}

/// Per-frame factor for variant blending.
pub fn variant_lerp_factor(dt_sec: f32, transition_ms: Option<f32>, hovered: bool) -> f32 {
    let rate = match transition_ms {
        Some(ms) if ms > 0.0 && ms.is_finite() => transition_rate(ms),
        _ if hovered => VARIANT_LERP_RATE_HOVERED,
        _ => VARIANT_LERP_RATE,
    };
    damp_factor(rate, dt_sec)
}

/// Component-wise blend of position, Euler rotation and scale.
#[inline]
pub fn blend_transform(
    current: &ShapeTransform,
    target: &ShapeTransform,
    t: f32,
) -> ShapeTransform {
    ShapeTransform {
        position: current.position.lerp(target.position, t),
        rotation: current.rotation.lerp(target.rotation, t),
        scale: current.scale.lerp(target.scale, t),
    }
}

pub fn blend_variant(current: &VariantState, target: &VariantState, t: f32) -> VariantState {
    current.map(|id, tr| blend_transform(tr, &target[id], t))
}
