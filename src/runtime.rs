//! One live scene in the page: controller, frame loop and DOM listeners.

use glam::Vec2;
use scene_core::menu::{ForwardOffset, HoverForward};
use scene_core::{
    InstanceId, ListenerId, ManagedInstance, SceneController, SceneError, SceneRegistry,
    SceneState, ShapeId, SharedController, StateUpdate, Viewport,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen_futures::spawn_local;

use crate::dom::DomListener;
use crate::frame::{start_loop, FrameLoop};
use crate::render::GpuRenderer;

thread_local! {
    pub static REGISTRY: SceneRegistry<SceneRuntime> = SceneRegistry::new();
}

pub struct SceneRuntime {
    this: Weak<SceneRuntime>,
    shared: SharedController<GpuRenderer>,
    hover: RefCell<HoverForward>,
    frame_loop: RefCell<Option<FrameLoop>>,
    listeners: RefCell<Vec<DomListener>>,
}

impl SceneRuntime {
    pub fn new(controller: SceneController<GpuRenderer>) -> Rc<Self> {
        let runtime = Rc::new_cyclic(|this: &Weak<SceneRuntime>| Self {
            this: this.clone(),
            shared: SharedController::new(controller),
            hover: RefCell::new(HoverForward::new()),
            frame_loop: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        let this = Rc::downgrade(&runtime);
        runtime.shared.set_on_dispose(move || {
            if let Some(rt) = this.upgrade() {
                rt.teardown();
            }
        });
        runtime
    }

    pub fn attach(&self, listeners: Vec<DomListener>) {
        *self.listeners.borrow_mut() = listeners;
    }

    pub fn id(&self) -> InstanceId {
        self.shared.id()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.is_disposed()
    }

    pub fn set_state(&self, update: StateUpdate) {
        self.shared.set_state(update);
    }

    pub fn get_state(&self) -> SceneState {
        self.shared.get_state()
    }

    pub fn frame(&self, now_sec: f64) {
        if self.is_disposed() {
            return;
        }
        match self.shared.with_controller(|c| c.tick(now_sec)) {
            Some(Err(SceneError::ContextLost)) => self.stop_loop(),
            Some(Err(e)) => log::error!("[scene] frame error: {e}"),
            _ => {}
        }
    }

    pub fn pointer_move(&self, client: Vec2, rect_origin: Vec2, rect_size: Vec2) {
        self.shared
            .with_controller(|c| c.pointer_move(client, rect_origin, rect_size));
    }

    pub fn set_hovered(&self, hovered: bool) {
        self.set_state(StateUpdate {
            hovered: Some(hovered),
            ..Default::default()
        });
    }

    pub fn resize(&self, viewport: Viewport) {
        self.shared.with_controller(|c| c.resize(viewport));
    }

    /// Hidden pages get no animation frames at all; showing the page again
    /// schedules a fresh loop and the controller restarts its clock.
    pub fn set_visible(&self, visible: bool) {
        let live = self
            .shared
            .with_controller(|c| {
                c.set_visible(visible);
                !c.is_context_lost() && !c.is_disposed()
            })
            .unwrap_or(false);
        if visible && live && !self.is_disposed() {
            self.start_loop();
        } else if !visible {
            self.stop_loop();
        }
    }

    pub fn context_lost(&self) {
        self.stop_loop();
        self.shared.with_controller(|c| c.handle_context_lost());
    }

    pub fn hover_forward(&self, targets: &[ShapeId], offset: ForwardOffset) {
        let snapshot = self.get_state();
        let update = self.hover.borrow_mut().enter(&snapshot, targets, offset);
        self.set_state(update);
    }

    pub fn hover_restore(&self) {
        let update = self.hover.borrow_mut().exit();
        if let Some(update) = update {
            self.set_state(update);
        }
    }

    pub fn on_state_change(
        &self,
        listener: impl FnMut(&SceneState) + 'static,
    ) -> Option<ListenerId> {
        self.shared.on_state_change(listener)
    }

    pub fn on_ready(&self, listener: impl FnMut() + 'static) -> Option<ListenerId> {
        self.shared.on_ready(listener)
    }

    pub fn on_context_lost(&self, listener: impl FnMut() + 'static) -> Option<ListenerId> {
        self.shared.on_context_lost(listener)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.shared.off(id)
    }

    fn start_loop(&self) {
        let mut slot = self.frame_loop.borrow_mut();
        if slot.is_none() {
            *slot = Some(start_loop(self.this.clone()));
        }
    }

    fn stop_loop(&self) {
        let frame_loop = self.frame_loop.borrow_mut().take();
        if let Some(frame_loop) = frame_loop {
            frame_loop.stop();
        }
    }

    /// Idempotent. From inside a listener the teardown is deferred until the
    /// controller call that fired it returns.
    pub fn dispose(&self) {
        self.shared.dispose();
    }

    fn teardown(&self) {
        self.stop_loop();
        // The running handler may be one of these; drop them on a later task.
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        spawn_local(async move {
            drop(listeners);
        });
        REGISTRY.with(|r| r.release(self.id()));
    }
}

impl ManagedInstance for SceneRuntime {
    fn instance_id(&self) -> InstanceId {
        self.id()
    }

    fn dispose(&self) {
        SceneRuntime::dispose(self);
    }
}
