//! The scene controller: owns the bundle, camera and backend, merges state
//! updates, and advances the animation one frame at a time.
//!
//! The controller never reads a clock or schedules frames on its own. The
//! front-end calls [`SceneController::tick`] with a monotonic timestamp once
//! per display frame, and routes DOM events to `pointer_move`, `resize`,
//! `set_visible` and `handle_context_lost`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bundle::ShapeBundle;
use crate::camera::OrthoCamera;
use crate::constants::*;
use crate::error::SceneError;
use crate::events::EventChannel;
use crate::interpolation::variant_lerp_factor;
use crate::material::Theme;
use crate::palette::{self, GradientPalette};
use crate::parallax::{group_motion, normalize_pointer, MotionInputs, PointerTracker};
use crate::registry::InstanceId;
use crate::renderer::{FrameView, SceneRenderer};
use crate::shape::ShapeMap;
use crate::state::{
    clamp_brightness, clamp_cursor_boost, clamp_unit, normalize_transition, PointerDriver,
    SceneState, StateUpdate,
};
use crate::variant::{
    create_responsive_variant_state, variant_template, VariantName, VariantState,
};

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub width: f32,
    pub height: f32,
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self {
            width: DEFAULT_BREAKPOINT_WIDTH,
            height: DEFAULT_BREAKPOINT_HEIGHT,
        }
    }
}

/// Initialization options. Unset fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneOptions {
    pub initial_variant: VariantName,
    pub theme: Theme,
    /// Defaults to the preset for `theme`.
    pub palette: Option<GradientPalette>,
    pub parallax: bool,
    pub breakpoint: Breakpoint,
    pub brightness: f32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            initial_variant: VariantName::Home,
            theme: Theme::Light,
            palette: None,
            parallax: true,
            breakpoint: Breakpoint::default(),
            brightness: 1.0,
        }
    }
}

/// Viewport in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width.max(0.0) * self.pixel_ratio) as u32;
        let h = (self.height.max(0.0) * self.pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameClock {
    last: Option<f64>,
    elapsed: f64,
}

impl FrameClock {
    /// Seconds since the previous call; zero on the first call after a restart.
    fn advance(&mut self, now_sec: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now_sec - last).max(0.0),
            None => 0.0,
        };
        self.last = Some(now_sec);
        self.elapsed += dt;
        dt as f32
    }

    fn restart(&mut self) {
        self.last = None;
    }
}

pub struct SceneController<R: SceneRenderer> {
    id: InstanceId,
    renderer: R,
    camera: OrthoCamera,
    bundle: ShapeBundle,
    state: SceneState,
    pointer: PointerTracker,
    viewport: Viewport,
    breakpoint: Breakpoint,
    events: EventChannel,
    clock: FrameClock,
    visible: bool,
    context_lost: bool,
    disposed: bool,
}

impl<R: SceneRenderer> SceneController<R> {
    /// Build the bundle, snap it to the responsive initial variant and upload
    /// it. Any backend failure here is fatal and returned as-is.
    pub fn new(
        mut renderer: R,
        options: SceneOptions,
        viewport: Viewport,
    ) -> Result<Self, SceneError> {
        let theme = options.theme;
        let palette = options
            .palette
            .unwrap_or_else(|| palette::for_theme(theme));
        let brightness = clamp_brightness(options.brightness).unwrap_or(1.0);
        let breakpoint = options.breakpoint;

        let variant = create_responsive_variant_state(
            variant_template(options.initial_variant),
            viewport.width,
            viewport.height,
            breakpoint.width,
            breakpoint.height,
        );

        let state = SceneState {
            variant_name: options.initial_variant,
            variant,
            variant_transition_ms: None,
            palette,
            theme,
            parallax: options.parallax,
            hovered: false,
            cursor_boost: 0.0,
            pointer: Vec2::ZERO,
            pointer_driver: PointerDriver::Device,
            manual_pointer: Vec2::ZERO,
            opacity: 1.0,
            shape_opacity: ShapeMap::splat(1.0),
            brightness,
            ready: false,
        };

        let mut bundle = ShapeBundle::new(&palette, theme, brightness);
        bundle.apply_variant(&state.variant);
        bundle.set_opacities(&state.effective_opacities());

        let camera = OrthoCamera::new(viewport.width, viewport.height);
        let (pw, ph) = viewport.physical_size();
        renderer.resize(pw, ph);
        bundle.upload(&mut renderer)?;

        let id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed);
        log::info!(
            "[scene] controller {} ready to animate: variant={:?} theme={:?} viewport={}x{}",
            id,
            state.variant_name,
            theme,
            viewport.width,
            viewport.height
        );

        Ok(Self {
            id,
            renderer,
            camera,
            bundle,
            state,
            pointer: PointerTracker::default(),
            viewport,
            breakpoint,
            events: EventChannel::default(),
            clock: FrameClock::default(),
            visible: true,
            context_lost: false,
            disposed: false,
        })
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Owned snapshot; safe to keep and mutate.
    pub fn get_state(&self) -> SceneState {
        self.state.clone()
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn events(&mut self) -> &mut EventChannel {
        &mut self.events
    }

    pub fn bundle(&self) -> &ShapeBundle {
        &self.bundle
    }

    pub fn camera(&self) -> &OrthoCamera {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Live mesh transforms, as opposed to `state().variant` (the target).
    pub fn live_variant(&self) -> VariantState {
        self.bundle.current_variant()
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn elapsed_sec(&self) -> f64 {
        self.clock.elapsed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_context_lost(&self) -> bool {
        self.context_lost
    }

    /// Responsive version of a named template for the current viewport.
    pub fn responsive_variant(&self, name: VariantName) -> VariantState {
        create_responsive_variant_state(
            variant_template(name),
            self.viewport.width,
            self.viewport.height,
            self.breakpoint.width,
            self.breakpoint.height,
        )
    }

    /// Merge `update` into the state. Only fields whose value actually changes
    /// have side effects; if anything changed, a `statechange` event has fired
    /// by the time this returns. Returns whether anything changed.
    pub fn set_state(&mut self, update: StateUpdate) -> bool {
        if self.disposed || self.context_lost {
            log::debug!("[scene] set_state ignored on inactive controller {}", self.id);
            return false;
        }
        let mut changed = false;

        if let Some(name) = update.variant_name {
            if name != self.state.variant_name {
                self.state.variant_name = name;
                changed = true;
                if update.variant.is_none() {
                    self.state.variant = self.responsive_variant(name);
                }
            }
        }

        if let Some(variant) = update.variant {
            let variant = if variant.all_valid() {
                variant
            } else {
                log::warn!("[scene] variant with invalid transforms sanitized");
                variant.sanitized()
            };
            if variant != self.state.variant {
                self.state.variant = variant;
                changed = true;
            }
        }

        if let Some(ms) = update.variant_transition_ms {
            let ms = normalize_transition(ms);
            if ms != self.state.variant_transition_ms {
                self.state.variant_transition_ms = ms;
                changed = true;
            }
        }

        if let Some(theme) = update.theme {
            if theme != self.state.theme {
                let old = self.state.theme;
                self.state.theme = theme;
                self.bundle.apply_theme(theme);
                changed = true;
                // Follow the theme preset unless a custom palette is in use.
                if update.palette.is_none() && self.state.palette == palette::for_theme(old) {
                    self.replace_palette(palette::for_theme(theme));
                }
            }
        }

        if let Some(palette) = update.palette {
            if palette != self.state.palette {
                self.replace_palette(palette);
                changed = true;
            }
        }

        if let Some(parallax) = update.parallax {
            if parallax != self.state.parallax {
                self.state.parallax = parallax;
                changed = true;
            }
        }

        if let Some(hovered) = update.hovered {
            if hovered != self.state.hovered {
                self.state.hovered = hovered;
                changed = true;
            }
        }

        if let Some(boost) = update.cursor_boost.and_then(clamp_cursor_boost) {
            if boost != self.state.cursor_boost {
                self.state.cursor_boost = boost;
                changed = true;
            }
        }

        if let Some(driver) = update.pointer_driver {
            if driver != self.state.pointer_driver {
                self.state.pointer_driver = driver;
                changed = true;
            }
        }

        if let Some(manual) = update.manual_pointer {
            let manual = if manual.is_finite() {
                manual.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
            } else {
                Vec2::ZERO
            };
            self.pointer.manual_target = manual;
            if manual != self.state.manual_pointer {
                self.state.manual_pointer = manual;
                changed = true;
            }
        }

        let pointer = self.pointer.target(self.state.pointer_driver);
        if pointer != self.state.pointer {
            self.state.pointer = pointer;
            changed = true;
        }

        if let Some(brightness) = update.brightness.and_then(clamp_brightness) {
            if brightness != self.state.brightness {
                self.state.brightness = brightness;
                self.bundle.set_brightness(brightness);
                changed = true;
            }
        }

        let mut opacity_changed = false;
        if let Some(opacity) = update.opacity.and_then(clamp_unit) {
            if opacity != self.state.opacity {
                self.state.opacity = opacity;
                opacity_changed = true;
            }
        }
        if let Some(shape_opacity) = update.shape_opacity {
            let current = self.state.shape_opacity;
            let clamped = shape_opacity.map(|id, v| clamp_unit(*v).unwrap_or(current[id]));
            if clamped != self.state.shape_opacity {
                self.state.shape_opacity = clamped;
                opacity_changed = true;
            }
        }
        if opacity_changed {
            self.bundle.set_opacities(&self.state.effective_opacities());
            changed = true;
        }

        if changed {
            self.emit_state_change();
        }
        changed
    }

    /// Functional form of [`set_state`](Self::set_state): `f` sees the
    /// current state read-only and returns the update to merge.
    pub fn update_state(&mut self, f: impl FnOnce(&SceneState) -> StateUpdate) -> bool {
        let update = f(&self.state);
        self.set_state(update)
    }

    fn replace_palette(&mut self, palette: GradientPalette) {
        self.state.palette = palette;
        if let Err(e) = self.bundle.apply_palette(&palette, &mut self.renderer) {
            log::error!("[scene] palette upload failed: {e}");
        }
    }

    fn emit_state_change(&mut self) {
        let snapshot = self.state.clone();
        self.events.emit_state_change(&snapshot);
    }

    /// Device pointer from raw client coordinates and the canvas rect.
    pub fn pointer_move(&mut self, client: Vec2, rect_origin: Vec2, rect_size: Vec2) {
        if self.disposed || self.context_lost {
            return;
        }
        let ndc = normalize_pointer(client, rect_origin, rect_size);
        self.pointer.device_target = ndc;
        if self.state.pointer_driver == PointerDriver::Device && ndc != self.state.pointer {
            self.state.pointer = ndc;
            self.emit_state_change();
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.set_state(StateUpdate {
            hovered: Some(hovered),
            ..Default::default()
        });
    }

    /// Pause or resume. Resuming restarts the frame clock so the first frame
    /// back has no delta.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        if visible {
            self.clock.restart();
        }
        log::info!("[scene] controller {} visible={}", self.id, visible);
    }

    /// Resize the backend and camera, then retarget the responsive variant
    /// through `set_state` so the relayout animates.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.disposed || self.context_lost {
            return;
        }
        self.viewport = viewport;
        self.camera.set_viewport(viewport.width, viewport.height);
        let (pw, ph) = viewport.physical_size();
        self.renderer.resize(pw, ph);
        let variant = self.responsive_variant(self.state.variant_name);
        self.set_state(StateUpdate {
            variant: Some(variant),
            ..Default::default()
        });
    }

    /// Advance one frame at monotonic time `now_sec` and draw it.
    pub fn tick(&mut self, now_sec: f64) -> Result<(), SceneError> {
        if self.disposed || self.context_lost || !self.visible {
            return Ok(());
        }
        let dt = self.clock.advance(now_sec);

        let t = variant_lerp_factor(dt, self.state.variant_transition_ms, self.state.hovered);
        self.bundle.blend_toward(&self.state.variant, t);

        self.pointer
            .step(self.state.pointer_driver, self.state.hovered, dt);
        self.bundle.group = group_motion(&MotionInputs {
            pointer: self.pointer.tracked,
            elapsed_sec: self.clock.elapsed as f32,
            hover_level: self.pointer.hover_level,
            cursor_boost: self.state.cursor_boost,
            parallax: self.state.parallax,
            half_extents: self.camera.half_extents(),
        });

        let frame = FrameView {
            bundle: &self.bundle,
            camera: &self.camera,
        };
        if let Err(e) = self.renderer.render(&frame) {
            if matches!(e, SceneError::ContextLost) {
                self.handle_context_lost();
            }
            return Err(e);
        }

        if !self.state.ready && self.clock.elapsed > READY_WARMUP_SEC {
            self.state.ready = true;
            log::info!("[scene] controller {} ready", self.id);
            self.events.emit_ready();
            self.emit_state_change();
        }
        Ok(())
    }

    /// Terminal: no further frames or updates until the caller disposes and
    /// rebuilds.
    pub fn handle_context_lost(&mut self) {
        if self.context_lost || self.disposed {
            return;
        }
        self.context_lost = true;
        log::error!("[scene] graphics context lost on controller {}", self.id);
        self.events.emit_context_lost();
    }

    /// Release every GPU resource and drop all listeners. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.bundle.dispose(&mut self.renderer);
        self.renderer.dispose();
        self.events.clear();
        log::info!("[scene] controller {} disposed", self.id);
    }
}

impl<R: SceneRenderer> Drop for SceneController<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}
