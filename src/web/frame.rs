// frame.rs - requestAnimationFrame loop with a stop flag
//
// The callback reschedules itself through `ticker::on_frame`. It only holds
// a weak link to itself; the loop owns the closure, and `stop` cancels the
// pending frame before releasing it together with everything the step owns.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::error::EngineError;
use crate::ticker::{on_frame, Schedule};

type Callback = RefCell<Option<Closure<dyn FnMut()>>>;

#[derive(Clone)]
struct RafScheduler {
    window: Window,
    callback: Weak<Callback>,
    pending: Rc<Cell<Option<i32>>>,
}

impl Schedule for RafScheduler {
    fn request(&mut self) -> Result<(), EngineError> {
        // released by `stop`
        let Some(f) = self.callback.upgrade() else {
            return Ok(());
        };
        if let Some(cb) = f.borrow().as_ref() {
            let id = self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            self.pending.set(Some(id));
        }
        Ok(())
    }
}

pub struct FrameLoop {
    window: Window,
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    callback: Rc<Callback>,
}

impl FrameLoop {
    pub fn start<F>(mut step: F) -> Result<Self, EngineError>
    where
        F: FnMut() -> Result<(), EngineError> + 'static,
    {
        let window = web_sys::window().ok_or(EngineError::NoWindow)?;
        let running = Rc::new(Cell::new(true));
        let pending = Rc::new(Cell::new(None));
        let callback: Rc<Callback> = Rc::new(RefCell::new(None));

        let mut sched = RafScheduler {
            window: window.clone(),
            callback: Rc::downgrade(&callback),
            pending: pending.clone(),
        };
        let mut first = sched.clone();
        let flag = running.clone();
        let fired = pending.clone();

        *callback.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            fired.set(None);
            on_frame(&flag, &mut step, &mut sched);
        }));

        first.request()?;
        Ok(Self { window, running, pending, callback })
    }

    /// Clear the flag, cancel the queued frame and free the callback
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.pending.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("could not cancel frame {}: {:?}", id, e);
            }
        }
        let cb = self.callback.borrow_mut().take();
        drop(cb);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
