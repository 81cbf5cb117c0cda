#![cfg(target_arch = "wasm32")]
//! Browser front-end for the signature-shapes scene: a wgpu renderer, the
//! animation-frame loop, DOM wiring and the exported script API. All scene
//! behaviour lives in `scene_core`.

use wasm_bindgen::prelude::*;

mod constants;
mod dom;
mod events;
mod frame;
mod handle;
mod render;
mod runtime;

pub use handle::{current_scene, dispose_scene, init_scene, off_scene_change, on_scene_change};
pub use handle::SceneHandle;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scene-web loaded");
    Ok(())
}
