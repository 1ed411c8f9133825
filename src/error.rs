// error.rs - Engine error type
//
// Construction failures are fatal and surface to the page as a string.
// Frame-time failures stop the loop.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("browser window or document is unavailable")]
    NoWindow,

    #[error("missing page element matching '{0}'")]
    MissingElement(String),

    #[error("WebGL: {0}")]
    WebGl(String),

    #[error("shader {stage} failed: {log}")]
    Shader { stage: &'static str, log: String },

    #[error("plane geometry {segments_x}x{segments_y} exceeds 16-bit vertex indices")]
    GeometryTooDense { segments_x: u32, segments_y: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config is not valid JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("animation library: {0}")]
    Animation(String),

    #[error("javascript: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for EngineError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        match v.as_string() {
            Some(s) => EngineError::Js(s),
            None => EngineError::Js(format!("{:?}", v)),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<EngineError> for wasm_bindgen::JsValue {
    fn from(e: EngineError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
