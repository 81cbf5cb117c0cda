use glam::Vec2;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, DomListener};
use crate::runtime::SceneRuntime;

/// Attach every DOM listener the runtime needs. Handlers hold only a weak
/// reference, so the listeners never keep a disposed scene alive.
pub fn wire_scene_listeners(
    runtime: &Rc<SceneRuntime>,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<Vec<DomListener>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas_target: &web::EventTarget = canvas.as_ref();
    let mut listeners = Vec::with_capacity(6);

    // Pointer moves are tracked over the whole window; the scene sits behind
    // page content that would otherwise swallow them.
    {
        let rt = Rc::downgrade(runtime);
        let canvas = canvas.clone();
        listeners.push(DomListener::new(window.as_ref(), "pointermove", move |ev| {
            let (Some(rt), Some(ev)) = (rt.upgrade(), ev.dyn_ref::<web::PointerEvent>()) else {
                return;
            };
            let (origin, size) = dom::canvas_rect(&canvas);
            let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            rt.pointer_move(client, origin, size);
        })?);
    }

    for (kind, hovered) in [("pointerenter", true), ("pointerleave", false)] {
        let rt = Rc::downgrade(runtime);
        listeners.push(DomListener::new(canvas_target, kind, move |_| {
            if let Some(rt) = rt.upgrade() {
                rt.set_hovered(hovered);
            }
        })?);
    }

    {
        let rt = Rc::downgrade(runtime);
        let canvas = canvas.clone();
        listeners.push(DomListener::new(window.as_ref(), "resize", move |_| {
            if let Some(rt) = rt.upgrade() {
                rt.resize(dom::sync_canvas_backing_size(&canvas));
            }
        })?);
    }

    {
        let rt = Rc::downgrade(runtime);
        listeners.push(DomListener::new(
            document.as_ref(),
            "visibilitychange",
            move |_| {
                if let Some(rt) = rt.upgrade() {
                    rt.set_visible(dom::document_visible());
                }
            },
        )?);
    }

    {
        let rt: Weak<SceneRuntime> = Rc::downgrade(runtime);
        listeners.push(DomListener::new(canvas_target, "webglcontextlost", move |_| {
            if let Some(rt) = rt.upgrade() {
                rt.context_lost();
            }
        })?);
    }

    Ok(listeners)
}
