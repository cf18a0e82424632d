//! Timer seams.
//!
//! Behaviors never touch browser timers directly. The page binds these
//! traits to `gloo` timers; tests bind them to [`crate::sim::VirtualScheduler`].

/// Delayed one-shot task runner.
pub trait Scheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Repeating task runner.
pub trait Repeater {
    /// Live repeating timer. Dropping it cancels the timer.
    type Handle: 'static;

    /// Run `task` every `period_ms` until the returned handle is dropped.
    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> Self::Handle;
}
