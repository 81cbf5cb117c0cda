// Shared host-side fixtures: a renderer double that records every backend
// call, plus helpers for building controllers and collecting events.

#![allow(dead_code)]

use scene_core::geometry::Geometry;
use scene_core::{
    FrameView, MaterialId, SceneController, SceneError, SceneOptions, SceneRenderer, SceneState,
    ShapeId, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;

pub const WIDE: Viewport = Viewport {
    width: 1440.0,
    height: 900.0,
    pixel_ratio: 1.0,
};

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub uploads: Vec<ShapeId>,
    pub released_meshes: Vec<ShapeId>,
    pub released_materials: Vec<MaterialId>,
    pub lights_released: usize,
    pub resizes: Vec<(u32, u32)>,
    pub frames: usize,
    pub disposed: usize,
    /// When set, every render reports a lost context.
    pub lose_context: bool,
}

impl SceneRenderer for RecordingRenderer {
    fn upload_mesh(&mut self, id: ShapeId, geometry: &Geometry) -> Result<(), SceneError> {
        assert!(!geometry.indices.is_empty(), "{id:?} uploaded without indices");
        self.uploads.push(id);
        Ok(())
    }

    fn release_mesh(&mut self, id: ShapeId) {
        self.released_meshes.push(id);
    }

    fn release_material(&mut self, material: MaterialId) {
        self.released_materials.push(material);
    }

    fn release_lights(&mut self) {
        self.lights_released += 1;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }

    fn render(&mut self, _frame: &FrameView<'_>) -> Result<(), SceneError> {
        if self.lose_context {
            return Err(SceneError::ContextLost);
        }
        self.frames += 1;
        Ok(())
    }

    fn dispose(&mut self) {
        self.disposed += 1;
    }
}

pub fn controller_with(options: SceneOptions) -> SceneController<RecordingRenderer> {
    SceneController::new(RecordingRenderer::default(), options, WIDE)
        .expect("recording renderer never fails to upload")
}

pub fn controller() -> SceneController<RecordingRenderer> {
    controller_with(SceneOptions::default())
}

/// Every `statechange` snapshot, in order.
pub fn record_state_changes(
    controller: &mut SceneController<RecordingRenderer>,
) -> Rc<RefCell<Vec<SceneState>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    controller
        .events()
        .on_state_change(move |state| sink.borrow_mut().push(state.clone()));
    seen
}

/// Tick from `start` in `steps` increments of `dt`, starting with a tick at
/// `start` itself.
pub fn run_frames(
    controller: &mut SceneController<RecordingRenderer>,
    start: f64,
    dt: f64,
    steps: usize,
) -> f64 {
    let mut now = start;
    controller.tick(now).expect("tick");
    for _ in 0..steps {
        now += dt;
        controller.tick(now).expect("tick");
    }
    now
}
