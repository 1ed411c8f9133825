// gsap.rs - GSAP bindings for line reveals
//
// Expects the `gsap`, `ScrollTrigger` and `SplitText` globals to be loaded
// before the module is mounted.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::RevealConfig;
use crate::error::EngineError;
use crate::reveal::{travel, TweenBackend};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = gsap, js_name = registerPlugin, catch)]
    fn register_plugin(plugin: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = gsap, js_name = from, catch)]
    fn gsap_from(targets: &JsValue, vars: &Object) -> Result<JsValue, JsValue>;

    type SplitText;

    #[wasm_bindgen(constructor, catch)]
    fn new(target: &Element, vars: &Object) -> Result<SplitText, JsValue>;

    #[wasm_bindgen(method, getter)]
    fn lines(this: &SplitText) -> Array;
}

pub struct GsapBackend;

impl GsapBackend {
    /// Check the globals and register the plugins we use
    pub fn new() -> Result<Self, EngineError> {
        let global = js_sys::global();
        for name in ["gsap", "ScrollTrigger", "SplitText"] {
            let v = Reflect::get(&global, &JsValue::from_str(name))?;
            if v.is_undefined() {
                return Err(EngineError::Animation(format!("{} is not loaded", name)));
            }
            if name != "gsap" {
                register_plugin(&v)?;
            }
        }
        Ok(Self)
    }
}

fn set(obj: &Object, key: &str, value: &JsValue) -> Result<(), EngineError> {
    Reflect::set(obj, &JsValue::from_str(key), value)?;
    Ok(())
}

impl TweenBackend for GsapBackend {
    type Node = Element;

    fn split_lines(&mut self, node: &Element, split_type: &str, class: &str) -> Result<Vec<Element>, EngineError> {
        let vars = Object::new();
        set(&vars, "type", &JsValue::from_str(split_type))?;
        set(&vars, "linesClass", &JsValue::from_str(class))?;
        let split = SplitText::new(node, &vars)?;
        Ok(split.lines().iter().filter_map(|v| v.dyn_into::<Element>().ok()).collect())
    }

    fn tween_from(&mut self, targets: &[Element], trigger: &Element, cfg: &RevealConfig) -> Result<(), EngineError> {
        let list: Array = targets.iter().collect();

        let st = Object::new();
        set(&st, "trigger", trigger)?;
        set(&st, "start", &JsValue::from_str(&cfg.start))?;

        let vars = Object::new();
        set(&vars, "scrollTrigger", &st)?;
        set(&vars, "duration", &JsValue::from_f64(cfg.duration))?;
        set(&vars, "y", &JsValue::from_str(&travel(cfg)))?;
        set(&vars, "ease", &JsValue::from_str(&cfg.ease))?;
        set(&vars, "skewY", &JsValue::from_f64(cfg.skew_y))?;
        set(&vars, "stagger", &JsValue::from_f64(cfg.stagger))?;

        gsap_from(&list, &vars)?;
        Ok(())
    }
}
