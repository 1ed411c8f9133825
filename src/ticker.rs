// ticker.rs - Per-callback decision of the frame loop
//
// Each animation-frame callback checks the running flag, runs one step and
// asks the scheduler for the next frame. A cleared flag, a failed step or a
// failed request leaves the flag cleared and nothing scheduled.

use std::cell::Cell;

use crate::error::EngineError;

/// Something that can queue the next frame callback
pub trait Schedule {
    fn request(&mut self) -> Result<(), EngineError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Flag was already cleared; the step did not run
    Idle,
    Scheduled,
    Failed,
}

pub fn on_frame<S, F>(running: &Cell<bool>, step: &mut F, sched: &mut S) -> Outcome
where
    S: Schedule,
    F: FnMut() -> Result<(), EngineError>,
{
    if !running.get() {
        return Outcome::Idle;
    }
    if let Err(e) = step() {
        log::error!("frame failed, stopping: {}", e);
        running.set(false);
        return Outcome::Failed;
    }
    if let Err(e) = sched.request() {
        log::error!("could not schedule frame: {}", e);
        running.set(false);
        return Outcome::Failed;
    }
    Outcome::Scheduled
}
