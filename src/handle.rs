//! Script-facing surface: `initScene`, `SceneHandle` and the registry
//! accessors.

use scene_core::events::SceneEventKind;
use scene_core::menu::ForwardOffset;
use scene_core::{SceneController, SceneOptions, SceneState, ShapeId, StateUpdate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::events::wire_scene_listeners;
use crate::render::GpuRenderer;
use crate::runtime::{SceneRuntime, REGISTRY};

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

fn call_listener(callback: &js_sys::Function, arg: &JsValue) {
    if let Err(e) = callback.call1(&JsValue::NULL, arg) {
        log::error!("[scene] listener threw: {e:?}");
    }
}

/// Build the renderer and controller for `canvas`, start the frame loop and
/// make the new scene the registered one (disposing any previous scene).
/// Rejects if no graphics context can be created.
#[wasm_bindgen(js_name = initScene)]
pub async fn init_scene(
    canvas: web::HtmlCanvasElement,
    options: JsValue,
) -> Result<SceneHandle, JsValue> {
    let options: SceneOptions = if options.is_undefined() || options.is_null() {
        SceneOptions::default()
    } else {
        from_js(options)?
    };
    // Release the previous scene's GPU resources before acquiring new ones.
    REGISTRY.with(|r| r.dispose_current());
    let viewport = dom::sync_canvas_backing_size(&canvas);
    let renderer = GpuRenderer::new(&canvas).await.map_err(js_error)?;
    let controller = SceneController::new(renderer, options, viewport).map_err(js_error)?;

    let runtime = SceneRuntime::new(controller);
    let listeners = wire_scene_listeners(&runtime, &canvas).map_err(js_error)?;
    runtime.attach(listeners);
    runtime.set_visible(dom::document_visible());
    REGISTRY.with(|r| r.install(runtime.clone()));
    Ok(SceneHandle { runtime })
}

#[wasm_bindgen]
pub struct SceneHandle {
    runtime: Rc<SceneRuntime>,
}

#[wasm_bindgen]
impl SceneHandle {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> f64 {
        self.runtime.id() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn disposed(&self) -> bool {
        self.runtime.is_disposed()
    }

    /// Accepts a partial state object, or a function receiving the current
    /// snapshot and returning one.
    #[wasm_bindgen(js_name = setState)]
    pub fn set_state(&self, update: JsValue) -> Result<(), JsValue> {
        let update = if let Some(f) = update.dyn_ref::<js_sys::Function>() {
            let snapshot = to_js(&self.runtime.get_state())?;
            f.call1(&JsValue::NULL, &snapshot)?
        } else {
            update
        };
        if update.is_undefined() || update.is_null() {
            return Ok(());
        }
        let update: StateUpdate = from_js(update)?;
        self.runtime.set_state(update);
        Ok(())
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.runtime.get_state())
    }

    /// Subscribe to `"statechange"`, `"ready"` or `"contextlost"`.
    pub fn on(&self, event: &str, callback: js_sys::Function) -> Result<u32, JsValue> {
        let kind: SceneEventKind = event.parse().map_err(js_error)?;
        let id = match kind {
            SceneEventKind::StateChange => {
                self.runtime
                    .on_state_change(move |state: &SceneState| match to_js(state) {
                        Ok(value) => call_listener(&callback, &value),
                        Err(e) => log::error!("[scene] snapshot conversion failed: {e:?}"),
                    })
            }
            SceneEventKind::Ready => self
                .runtime
                .on_ready(move || call_listener(&callback, &JsValue::UNDEFINED)),
            SceneEventKind::ContextLost => self
                .runtime
                .on_context_lost(move || call_listener(&callback, &JsValue::UNDEFINED)),
        };
        id.ok_or_else(|| js_error("cannot subscribe while the scene is dispatching"))
    }

    pub fn off(&self, id: u32) -> bool {
        self.runtime.off(id)
    }

    /// Push the targeted shapes forward and dim the rest until `hoverRestore`.
    #[wasm_bindgen(js_name = hoverForward)]
    pub fn hover_forward(&self, shapes: JsValue, offset: JsValue) -> Result<(), JsValue> {
        let shapes: Vec<ShapeId> = from_js(shapes)?;
        let offset: ForwardOffset = if offset.is_undefined() || offset.is_null() {
            ForwardOffset::default()
        } else {
            from_js(offset)?
        };
        self.runtime.hover_forward(&shapes, offset);
        Ok(())
    }

    #[wasm_bindgen(js_name = hoverRestore)]
    pub fn hover_restore(&self) {
        self.runtime.hover_restore();
    }

    pub fn dispose(&self) {
        self.runtime.dispose();
    }
}

#[wasm_bindgen(js_name = currentScene)]
pub fn current_scene() -> Option<SceneHandle> {
    REGISTRY
        .with(|r| r.current())
        .map(|runtime| SceneHandle { runtime })
}

/// `callback` receives the new handle, or `undefined` once the slot empties.
#[wasm_bindgen(js_name = onSceneChange)]
pub fn on_scene_change(callback: js_sys::Function) -> u32 {
    REGISTRY.with(|r| {
        r.subscribe(move |current| {
            let arg = current
                .map(|runtime| JsValue::from(SceneHandle { runtime: runtime.clone() }))
                .unwrap_or(JsValue::UNDEFINED);
            call_listener(&callback, &arg);
        })
    })
}

#[wasm_bindgen(js_name = offSceneChange)]
pub fn off_scene_change(id: u32) -> bool {
    REGISTRY.with(|r| r.unsubscribe(id))
}

#[wasm_bindgen(js_name = disposeScene)]
pub fn dispose_scene() {
    REGISTRY.with(|r| r.dispose_current());
}
