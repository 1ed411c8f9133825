// web/ - Browser side
//
// DOM page adapter, WebGL surface, GSAP reveals and the frame loop,
// wired together by `mount`.

mod frame;
mod gl;
mod gsap;
mod page;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::canvas::EffectCanvas;
use crate::config::EffectConfig;
use crate::error::EngineError;
use crate::reveal::register_reveals;

pub use frame::FrameLoop;
pub use gl::WebGlSurface;
pub use gsap::GsapBackend;
pub use page::DomPage;

/// Running effect, returned to the page by `mount`
#[wasm_bindgen]
pub struct EffectHandle {
    window: Window,
    frames: FrameLoop,
    resize: Option<Closure<dyn FnMut()>>,
    plane_count: usize,
    reveal_count: usize,
}

#[wasm_bindgen]
impl EffectHandle {
    /// Stop the frame loop, detach the resize listener and remove the canvas
    pub fn stop(&mut self) {
        self.shutdown();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.frames.is_running()
    }

    #[wasm_bindgen(getter, js_name = planeCount)]
    pub fn plane_count(&self) -> usize {
        self.plane_count
    }

    #[wasm_bindgen(getter, js_name = revealCount)]
    pub fn reveal_count(&self) -> usize {
        self.reveal_count
    }
}

impl EffectHandle {
    // Idempotent; the listener is detached before its closure is freed
    fn shutdown(&mut self) {
        let Some(resize) = self.resize.take() else {
            return;
        };
        self.frames.stop();
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
        {
            log::warn!("resize listener not removed: {:?}", e);
        }
        drop(resize);
        log::info!("effect stopped");
    }
}

// Freeing the handle from JS, or losing it to the GC, tears the effect down
impl Drop for EffectHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

pub fn mount(cfg: EffectConfig) -> Result<EffectHandle, EngineError> {
    let window = web_sys::window().ok_or(EngineError::NoWindow)?;
    let page = DomPage::new(window.clone(), &cfg.selectors)?;

    let reveal_count = reveal_headings(&page, &cfg);

    let main = page.query(&cfg.selectors.main)?;
    let ratio = cfg.pixel_ratio.unwrap_or_else(|| window.device_pixel_ratio());
    let surface = WebGlSurface::new(page.document(), &main, &cfg, ratio)?;

    let canvas = Rc::new(RefCell::new(EffectCanvas::new(page, surface, &cfg)?));
    let plane_count = canvas.borrow().planes().len();

    let resize = {
        let canvas = canvas.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = canvas.borrow_mut().resize() {
                log::error!("resize failed: {}", e);
            }
        })
    };
    // listener goes on last so a failed start leaves nothing registered
    let frames = FrameLoop::start(move || canvas.borrow_mut().tick())?;
    window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

    log::info!("effect mounted: {} planes, {} reveals", plane_count, reveal_count);
    Ok(EffectHandle { window, frames, resize: Some(resize), plane_count, reveal_count })
}

// Reveals are decoration; a missing tween library only disables them
fn reveal_headings(page: &DomPage, cfg: &EffectConfig) -> usize {
    if !cfg.reveal.enabled {
        return 0;
    }
    let result = page
        .query_all(&cfg.selectors.headings)
        .and_then(|headings| {
            let mut backend = GsapBackend::new()?;
            register_reveals(&mut backend, &headings, &cfg.reveal)
        });
    match result {
        Ok(n) => n,
        Err(e) => {
            log::warn!("text reveals disabled: {}", e);
            0
        }
    }
}
