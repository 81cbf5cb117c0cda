//! The six meshes plus scene lights that make up the signature mark.

use fnv::FnvHashSet;
use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::error::SceneError;
use crate::geometry::Geometry;
use crate::interpolation::blend_transform;
use crate::material::{MaterialId, SceneLights, ShapeMaterials, Theme};
use crate::palette::GradientPalette;
use crate::renderer::SceneRenderer;
use crate::shape::{ShapeId, ShapeMap, ShapeTransform};
use crate::shapes::build_shape_geometry;
use crate::variant::VariantState;

#[derive(Clone, Debug)]
pub struct Mesh {
    pub id: ShapeId,
    pub geometry: Geometry,
    pub materials: ShapeMaterials,
    pub transform: ShapeTransform,
    /// Always false: transforms are written every frame, so cached bounds
    /// would cull shapes that have moved.
    pub frustum_culled: bool,
}

impl Mesh {
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }
}

/// Whole-group offset from parallax and breathing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl GroupTransform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

pub struct ShapeBundle {
    meshes: ShapeMap<Mesh>,
    lights: Option<SceneLights>,
    pub group: GroupTransform,
    theme: Theme,
    brightness: f32,
    palette: GradientPalette,
    disposed: bool,
}

impl ShapeBundle {
    pub fn new(palette: &GradientPalette, theme: Theme, brightness: f32) -> Self {
        let meshes = ShapeMap::from_fn(|id| Mesh {
            id,
            geometry: build_shape_geometry(id, &palette[id]),
            materials: ShapeMaterials::new(id, theme, brightness),
            transform: ShapeTransform::IDENTITY,
            frustum_culled: false,
        });
        Self {
            meshes,
            lights: Some(SceneLights::tuned(theme, brightness)),
            group: GroupTransform::default(),
            theme,
            brightness,
            palette: *palette,
            disposed: false,
        }
    }

    /// Push every mesh's buffers to the backend.
    pub fn upload(&self, renderer: &mut dyn SceneRenderer) -> Result<(), SceneError> {
        for (id, mesh) in self.meshes.iter() {
            renderer.upload_mesh(id, &mesh.geometry)?;
        }
        Ok(())
    }

    pub fn meshes(&self) -> &ShapeMap<Mesh> {
        &self.meshes
    }

    pub fn mesh(&self, id: ShapeId) -> &Mesh {
        &self.meshes[id]
    }

    pub fn lights(&self) -> Option<&SceneLights> {
        self.lights.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn palette(&self) -> &GradientPalette {
        &self.palette
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Snap every mesh to `variant` with no blending.
    pub fn apply_variant(&mut self, variant: &VariantState) {
        for (id, mesh) in self.meshes.iter_mut() {
            mesh.transform = variant[id];
        }
    }

    /// Move every mesh `t` of the way toward `target`.
    pub fn blend_toward(&mut self, target: &VariantState, t: f32) {
        for (id, mesh) in self.meshes.iter_mut() {
            mesh.transform = blend_transform(&mesh.transform, &target[id], t);
        }
    }

    /// Live (in-flight) transforms.
    pub fn current_variant(&self) -> VariantState {
        self.meshes.map(|_, mesh| mesh.transform)
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        for (_, mesh) in self.meshes.iter_mut() {
            mesh.materials.apply_theme(theme, self.brightness);
        }
        if self.lights.is_some() {
            self.lights = Some(SceneLights::tuned(theme, self.brightness));
        }
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        if brightness == self.brightness {
            return;
        }
        self.brightness = brightness;
        self.apply_theme(self.theme);
    }

    /// Recolour every shape and re-upload its buffers.
    pub fn apply_palette(
        &mut self,
        palette: &GradientPalette,
        renderer: &mut dyn SceneRenderer,
    ) -> Result<(), SceneError> {
        self.palette = *palette;
        for (id, mesh) in self.meshes.iter_mut() {
            mesh.geometry = build_shape_geometry(id, &palette[id]);
            renderer.upload_mesh(id, &mesh.geometry)?;
        }
        Ok(())
    }

    /// Per-shape effective opacity, already clamped by the caller.
    pub fn set_opacities(&mut self, opacities: &ShapeMap<f32>) {
        for (id, mesh) in self.meshes.iter_mut() {
            mesh.materials.set_opacity(opacities[id]);
        }
    }

    /// Release geometries, the de-duplicated material set and the lights.
    /// Safe to call more than once.
    pub fn dispose(&mut self, renderer: &mut dyn SceneRenderer) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        let mut materials: FnvHashSet<MaterialId> = FnvHashSet::default();
        for (id, mesh) in self.meshes.iter() {
            renderer.release_mesh(id);
            materials.extend(mesh.materials.ids());
        }
        for material in materials {
            renderer.release_material(material);
        }
        if self.lights.take().is_some() {
            renderer.release_lights();
        }
    }
}
