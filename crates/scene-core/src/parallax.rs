use glam::{Vec2, Vec3};

use crate::bundle::GroupTransform;
use crate::constants::*;
use crate::interpolation::damp_factor;
use crate::state::PointerDriver;

/// Client coordinates to `[-1, 1]²` relative to a canvas rect, +Y up.
/// A zero-sized rect maps everything to the centre.
#[inline]
pub fn normalize_pointer(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Vec2 {
    if !(rect_size.x > 0.0 && rect_size.y > 0.0) {
        return Vec2::ZERO;
    }
    let u = (client - rect_origin) / rect_size;
    let ndc = Vec2::new(u.x * 2.0 - 1.0, 1.0 - u.y * 2.0);
    if ndc.is_finite() {
        ndc.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
    } else {
        Vec2::ZERO
    }
}

/// Device and manual pointer targets plus the smoothed pointer parallax
/// actually follows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    pub device_target: Vec2,
    pub manual_target: Vec2,
    pub tracked: Vec2,
    /// Smoothed 0..1 hover amount.
    pub hover_level: f32,
}

impl PointerTracker {
    pub fn target(&self, driver: PointerDriver) -> Vec2 {
        match driver {
            PointerDriver::Device => self.device_target,
            PointerDriver::Manual => self.manual_target,
        }
    }

    pub fn step(&mut self, driver: PointerDriver, hovered: bool, dt_sec: f32) {
        let k = damp_factor(POINTER_LERP_RATE, dt_sec);
        self.tracked = self.tracked.lerp(self.target(driver), k);
        let hover_goal = if hovered { 1.0 } else { 0.0 };
        self.hover_level += (hover_goal - self.hover_level) * k;
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MotionInputs {
    pub pointer: Vec2,
    pub elapsed_sec: f32,
    pub hover_level: f32,
    pub cursor_boost: f32,
    pub parallax: bool,
    /// Visible half extents of the camera at z = 0.
    pub half_extents: Vec2,
}

/// Group-level tilt, drift and breathing for one frame.
pub fn group_motion(inputs: &MotionInputs) -> GroupTransform {
    let breath = (inputs.elapsed_sec * BREATHING_SPEED).sin();
    let influence = if inputs.parallax {
        (1.0 + inputs.cursor_boost * CURSOR_BOOST_GAIN).max(0.0)
    } else {
        0.0
    };
    let p = inputs.pointer * influence;

    let bound = inputs.half_extents * GROUP_BOUND_FRACTION;
    let shift = (p * PARALLAX_SHIFT).clamp(-bound, bound);

    GroupTransform {
        position: Vec3::new(shift.x, shift.y, 0.0),
        rotation: Vec3::new(
            -p.y * PARALLAX_TILT + breath * BREATHING_ROTATION,
            p.x * PARALLAX_TILT,
            breath * BREATHING_ROTATION * 0.5,
        ),
        scale: 1.0 + breath * BREATHING_SCALE + inputs.hover_level * HOVER_SCALE_BOOST,
    }
}
