use glam::{Mat4, Vec2, Vec3};

use crate::constants::{CAMERA_FAR, CAMERA_NEAR, CAMERA_Z, FRUSTUM_HALF_HEIGHT};

/// Orthographic camera looking down -Z. Top and bottom stay fixed; left and
/// right follow the viewport aspect ratio.
#[derive(Clone, Debug, PartialEq)]
pub struct OrthoCamera {
    pub eye: Vec3,
    pub half_height: f32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl OrthoCamera {
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            half_height: FRUSTUM_HALF_HEIGHT,
            left: -FRUSTUM_HALF_HEIGHT,
            right: FRUSTUM_HALF_HEIGHT,
            top: FRUSTUM_HALF_HEIGHT,
            bottom: -FRUSTUM_HALF_HEIGHT,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        };
        camera.set_viewport(width, height);
        camera
    }

    /// Recompute left/right for a new viewport. Degenerate sizes keep the
    /// previous frustum.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        let aspect = width / height;
        self.left = -self.half_height * aspect;
        self.right = self.half_height * aspect;
        self.top = self.half_height;
        self.bottom = -self.half_height;
    }

    pub fn aspect(&self) -> f32 {
        (self.right - self.left) / (self.top - self.bottom)
    }

    /// Half extents of the visible world rectangle at z = 0.
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new((self.right - self.left) * 0.5, (self.top - self.bottom) * 0.5)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.znear,
            self.zfar,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, Vec3::new(self.eye.x, self.eye.y, 0.0), Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
