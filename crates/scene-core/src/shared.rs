//! A controller shared with its own listeners.
//!
//! Listeners run while the controller is mutably borrowed, so anything they
//! ask of it has to wait. `SharedController` keeps the borrow in a `RefCell`
//! and turns those nested calls into deferred work: updates are queued and
//! applied before the outermost call returns, `dispose` is postponed until
//! the dispatching call unwinds, and `get_state` answers from a snapshot
//! mirrored by the first registered listener.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::controller::SceneController;
use crate::events::ListenerId;
use crate::registry::InstanceId;
use crate::renderer::SceneRenderer;
use crate::state::{SceneState, StateUpdate};

type DisposeHook = Box<dyn FnOnce()>;

pub struct SharedController<R: SceneRenderer> {
    id: InstanceId,
    controller: RefCell<SceneController<R>>,
    snapshot: Rc<RefCell<SceneState>>,
    mirror_listener: ListenerId,
    pending: RefCell<VecDeque<StateUpdate>>,
    dispose_requested: Cell<bool>,
    disposed: Cell<bool>,
    on_dispose: RefCell<Option<DisposeHook>>,
}

impl<R: SceneRenderer> SharedController<R> {
    pub fn new(mut controller: SceneController<R>) -> Self {
        let snapshot = Rc::new(RefCell::new(controller.get_state()));
        let mirror = snapshot.clone();
        let mirror_listener = controller.events().on_state_change(move |state| {
            *mirror.borrow_mut() = state.clone();
        });
        Self {
            id: controller.id(),
            controller: RefCell::new(controller),
            snapshot,
            mirror_listener,
            pending: RefCell::new(VecDeque::new()),
            dispose_requested: Cell::new(false),
            disposed: Cell::new(false),
            on_dispose: RefCell::new(None),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Run once, right after the controller has been disposed.
    pub fn set_on_dispose(&self, hook: impl FnOnce() + 'static) {
        *self.on_dispose.borrow_mut() = Some(Box::new(hook));
    }

    /// Run `f` against the controller, then drain anything listeners queued
    /// while it ran and carry out a dispose they asked for. Returns `None` if
    /// the controller is already borrowed further up the stack.
    pub fn with_controller<T>(
        &self,
        f: impl FnOnce(&mut SceneController<R>) -> T,
    ) -> Option<T> {
        let result = {
            let mut controller = self.controller.try_borrow_mut().ok()?;
            let result = f(&mut controller);
            while !self.dispose_requested.get() {
                let next = self.pending.borrow_mut().pop_front();
                match next {
                    Some(update) => {
                        controller.set_state(update);
                    }
                    None => break,
                }
            }
            result
        };
        if self.dispose_requested.get() {
            self.dispose();
        }
        Some(result)
    }

    /// Merge `update`, or queue it if a listener is running.
    pub fn set_state(&self, update: StateUpdate) {
        if self.disposed.get() || self.dispose_requested.get() || update.is_empty() {
            return;
        }
        let queued = update.clone();
        if self.with_controller(|c| c.set_state(update)).is_none() {
            log::debug!("[scene] set_state during dispatch on {}; queued", self.id);
            self.pending.borrow_mut().push_back(queued);
        }
    }

    /// Owned snapshot; readable from inside listeners.
    pub fn get_state(&self) -> SceneState {
        self.snapshot.borrow().clone()
    }

    pub fn on_state_change(
        &self,
        listener: impl FnMut(&SceneState) + 'static,
    ) -> Option<ListenerId> {
        self.with_controller(|c| c.events().on_state_change(listener))
    }

    pub fn on_ready(&self, listener: impl FnMut() + 'static) -> Option<ListenerId> {
        self.with_controller(|c| c.events().on_ready(listener))
    }

    pub fn on_context_lost(&self, listener: impl FnMut() + 'static) -> Option<ListenerId> {
        self.with_controller(|c| c.events().on_context_lost(listener))
    }

    /// Remove a listener. The internal snapshot mirror cannot be removed.
    pub fn off(&self, id: ListenerId) -> bool {
        if id == self.mirror_listener {
            return false;
        }
        self.with_controller(|c| c.events().remove(id)).unwrap_or(false)
    }

    /// Idempotent. Called from a listener, the teardown is deferred until the
    /// controller call that fired it returns.
    pub fn dispose(&self) {
        if self.disposed.get() {
            return;
        }
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            self.dispose_requested.set(true);
            return;
        };
        self.disposed.set(true);
        self.pending.borrow_mut().clear();
        controller.dispose();
        drop(controller);
        let hook = self.on_dispose.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
    }
}
