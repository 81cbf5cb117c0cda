//! Hover-forward effect for the navigation menu.
//!
//! Entering captures the current target variant and per-shape opacity, pushes
//! an offset copy with the untouched shapes dimmed, and exiting pushes the
//! captured values back verbatim so repeated hovers never drift.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::controller::SceneController;
use crate::renderer::SceneRenderer;
use crate::shape::{ShapeId, ShapeMap};
use crate::state::{SceneState, StateUpdate};
use crate::variant::VariantState;

/// Deltas applied to the hovered shapes, and the opacity for the rest.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForwardOffset {
    pub position: Vec3,
    pub rotation: Vec3,
    pub dim_opacity: f32,
}

impl Default for ForwardOffset {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.2),
            rotation: Vec3::new(0.0, 0.0, 0.12),
            dim_opacity: 0.35,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Captured {
    variant: VariantState,
    shape_opacity: ShapeMap<f32>,
}

#[derive(Clone, Debug, Default)]
pub struct HoverForward {
    captured: Option<Captured>,
}

impl HoverForward {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.captured.is_some()
    }

    /// Build the forward update from `snapshot`. The first enter captures the
    /// snapshot; entering again while active offsets from the original
    /// capture, so moving between menu items does not stack offsets.
    pub fn enter(
        &mut self,
        snapshot: &SceneState,
        targets: &[ShapeId],
        offset: ForwardOffset,
    ) -> StateUpdate {
        let base = *self.captured.get_or_insert_with(|| Captured {
            variant: snapshot.variant,
            shape_opacity: snapshot.shape_opacity,
        });

        let mut variant = base.variant;
        let mut shape_opacity = base.shape_opacity;
        for (id, transform) in variant.iter_mut() {
            if targets.contains(&id) {
                transform.position += offset.position;
                transform.rotation += offset.rotation;
            } else {
                shape_opacity[id] = shape_opacity[id].min(offset.dim_opacity);
            }
        }

        StateUpdate {
            variant: Some(variant),
            shape_opacity: Some(shape_opacity),
            ..Default::default()
        }
    }

    /// The update restoring the captured snapshot, or `None` if not hovering.
    pub fn exit(&mut self) -> Option<StateUpdate> {
        let captured = self.captured.take()?;
        Some(StateUpdate {
            variant: Some(captured.variant),
            shape_opacity: Some(captured.shape_opacity),
            ..Default::default()
        })
    }

    /// Drop the capture without restoring, e.g. after navigation replaced the
    /// variant underneath the hover.
    pub fn forget(&mut self) {
        self.captured = None;
    }

    pub fn enter_on<R: SceneRenderer>(
        &mut self,
        controller: &mut SceneController<R>,
        targets: &[ShapeId],
        offset: ForwardOffset,
    ) -> bool {
        let update = self.enter(controller.state(), targets, offset);
        controller.set_state(update)
    }

    pub fn exit_on<R: SceneRenderer>(&mut self, controller: &mut SceneController<R>) -> bool {
        match self.exit() {
            Some(update) => controller.set_state(update),
            None => false,
        }
    }
}
