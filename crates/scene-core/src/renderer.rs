use crate::bundle::ShapeBundle;
use crate::camera::OrthoCamera;
use crate::error::SceneError;
use crate::geometry::Geometry;
use crate::material::MaterialId;
use crate::shape::ShapeId;

/// Everything a backend needs to draw one frame.
pub struct FrameView<'a> {
    pub bundle: &'a ShapeBundle,
    pub camera: &'a OrthoCamera,
}

/// GPU backend seam. The web front-end implements this with wgpu; host tests
/// use a recording double.
///
/// Release calls are issued at most once per resource by the bundle; a
/// backend may still treat unknown ids as no-ops.
pub trait SceneRenderer {
    /// Create or replace the vertex/index buffers for one shape.
    fn upload_mesh(&mut self, id: ShapeId, geometry: &Geometry) -> Result<(), SceneError>;

    fn release_mesh(&mut self, id: ShapeId);

    fn release_material(&mut self, material: MaterialId);

    fn release_lights(&mut self);

    /// Backing size in physical pixels.
    fn resize(&mut self, width: u32, height: u32);

    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), SceneError>;

    /// Drop the device, surface and any render targets.
    fn dispose(&mut self);
}
