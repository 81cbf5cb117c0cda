use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::runtime::SceneRuntime;

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A cancellable `requestAnimationFrame` loop driving one runtime.
pub struct FrameLoop {
    tick: TickClosure,
    pending: Rc<Cell<Option<i32>>>,
}

fn request_frame(tick: &TickClosure, pending: &Cell<Option<i32>>) {
    let Some(window) = web::window() else {
        return;
    };
    let slot = tick.borrow();
    if let Some(closure) = slot.as_ref() {
        if let Ok(handle) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            pending.set(Some(handle));
        }
    }
}

pub fn start_loop(runtime: Weak<SceneRuntime>) -> FrameLoop {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));
    let origin = Instant::now();

    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        let Some(rt) = runtime.upgrade() else {
            return;
        };
        rt.frame(origin.elapsed().as_secs_f64());
        request_frame(&tick_clone, &pending_clone);
    }) as Box<dyn FnMut()>));

    request_frame(&tick, &pending);
    FrameLoop { tick, pending }
}

impl FrameLoop {
    /// Cancel the scheduled frame and release the callback. Safe to call from
    /// inside the callback itself: the closure is dropped on a later task.
    pub fn stop(&self) {
        if let (Some(handle), Some(window)) = (self.pending.take(), web::window()) {
            let _ = window.cancel_animation_frame(handle);
        }
        let closure = self.tick.borrow_mut().take();
        if closure.is_some() {
            spawn_local(async move {
                drop(closure);
            });
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
