use wasm_bindgen::prelude::*;

// ============================================================================
// GLIDE - Smooth-scroll image planes with scroll-triggered text reveals
// ============================================================================
//
// Pure modules build and test on any target. `web` binds them to the DOM,
// WebGL and GSAP and only exists on wasm32.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod plane;
pub mod reveal;
pub mod scroll;
pub mod shader;
pub mod ticker;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
mod web;

pub use canvas::{DrawSurface, EffectCanvas, Page};
pub use config::EffectConfig;
pub use error::EngineError;

#[cfg(target_arch = "wasm32")]
pub use web::EffectHandle;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Trace).ok();
    log::set_max_level(log::LevelFilter::Info);
}

/// Mount the effect on the current page. `options` is a JSON object
/// overriding any field of the default config.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn mount(options: Option<String>) -> Result<EffectHandle, JsValue> {
    let cfg = EffectConfig::from_json(options.as_deref().unwrap_or(""))?;
    log::set_max_level(cfg.level().to_level_filter());
    web::mount(cfg).map_err(|e| {
        log::error!("mount failed: {}", e);
        e.into()
    })
}

/// Default configuration as pretty JSON
#[wasm_bindgen]
pub fn default_config() -> String {
    EffectConfig::default().to_json().unwrap_or_default()
}
