//! Countdown to the wedding.
//!
//! ## States
//!
//! | State | Meaning |
//! |-------|---------|
//! | Uninitialized | Not started; nothing rendered |
//! | Running | Rendering remaining time on every tick |
//! | Completed | Completion message shown; ticks are ignored |
//!
//! The owner drives the machine: [`Countdown::start`] once, then
//! [`Countdown::tick`] on every timer period until it reports
//! [`CountdownState::Completed`], at which point the timer must be cancelled.
//! [`CountdownTimer`] does exactly that on top of a [`Repeater`].

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::time::Clock;
use crate::timer::Repeater;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Remaining time split into display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownFields {
    pub days: i64,
    /// 0-23
    pub hours: i64,
    /// 0-59
    pub minutes: i64,
    /// 0-59
    pub seconds: i64,
}

impl CountdownFields {
    /// Split a millisecond distance using floor division.
    pub fn from_millis(distance_ms: i64) -> Self {
        Self {
            days: distance_ms.div_euclid(MS_PER_DAY),
            hours: distance_ms.rem_euclid(MS_PER_DAY) / MS_PER_HOUR,
            minutes: distance_ms.rem_euclid(MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: distance_ms.rem_euclid(MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// Whole seconds represented by these fields.
    pub fn total_seconds(&self) -> i64 {
        ((self.days * 24 + self.hours) * 60 + self.minutes) * 60 + self.seconds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownState {
    #[default]
    Uninitialized,
    Running,
    Completed,
}

impl CountdownState {
    pub fn is_completed(&self) -> bool {
        matches!(self, CountdownState::Completed)
    }
}

/// Where the countdown renders.
pub trait CountdownView {
    fn show_remaining(&mut self, fields: &CountdownFields);
    fn show_complete(&mut self, message: &str);
}

/// Countdown state machine bound to its view.
pub struct Countdown<V> {
    target: DateTime<Utc>,
    complete_message: String,
    state: CountdownState,
    view: V,
}

impl<V: CountdownView> Countdown<V> {
    pub fn new(target: DateTime<Utc>, complete_message: impl Into<String>, view: V) -> Self {
        Self {
            target,
            complete_message: complete_message.into(),
            state: CountdownState::Uninitialized,
            view,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Enter Running and render tick 0 immediately.
    ///
    /// Returns Completed straight away when `now` is already past the
    /// target. Calling `start` on a started countdown is a no-op.
    pub fn start(&mut self, now: DateTime<Utc>) -> CountdownState {
        if self.state != CountdownState::Uninitialized {
            return self.state;
        }
        self.state = CountdownState::Running;
        self.tick(now)
    }

    /// Render the time remaining at `now`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> CountdownState {
        if self.state != CountdownState::Running {
            return self.state;
        }

        let distance_ms = (self.target - now).num_milliseconds();
        if distance_ms < 0 {
            self.view.show_complete(&self.complete_message);
            self.state = CountdownState::Completed;
            tracing::info!(target_date = %self.target, "countdown completed");
        } else {
            let fields = CountdownFields::from_millis(distance_ms);
            tracing::trace!(?fields, "countdown tick");
            self.view.show_remaining(&fields);
        }
        self.state
    }

    /// Stop ticking without rendering the completion message.
    pub fn stop(&mut self) {
        self.state = CountdownState::Completed;
    }
}

/// Countdown bound to a repeating timer.
///
/// The timer handle is private and released exactly once: when the
/// countdown completes, or on [`CountdownTimer::stop`]. Dropping the
/// `CountdownTimer` itself leaves a running timer running.
pub struct CountdownTimer<V, C, R: Repeater> {
    countdown: Rc<RefCell<Countdown<V>>>,
    ticker: Rc<RefCell<Option<R::Handle>>>,
    clock: C,
    repeater: R,
    tick_ms: u32,
}

impl<V, C, R> CountdownTimer<V, C, R>
where
    V: CountdownView + 'static,
    C: Clock + Clone + 'static,
    R: Repeater,
{
    pub fn new(countdown: Countdown<V>, clock: C, repeater: R, tick_ms: u32) -> Self {
        Self {
            countdown: Rc::new(RefCell::new(countdown)),
            ticker: Rc::new(RefCell::new(None)),
            clock,
            repeater,
            tick_ms,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.countdown.borrow().state()
    }

    /// Whether a repeating timer is currently held.
    pub fn is_ticking(&self) -> bool {
        self.ticker.borrow().is_some()
    }

    /// Render immediately, then every `tick_ms` until the target passes.
    ///
    /// No timer is created if the target has already passed, and a second
    /// call never creates another one.
    pub fn start(&self) -> CountdownState {
        let state = self.countdown.borrow_mut().start(self.clock.now());
        tracing::info!(target_date = %self.countdown.borrow().target(), ?state, "countdown started");
        if state != CountdownState::Running || self.is_ticking() {
            return state;
        }

        let countdown = self.countdown.clone();
        let slot = self.ticker.clone();
        let clock = self.clock.clone();
        let handle = self.repeater.every(
            self.tick_ms,
            Box::new(move || {
                let state = countdown.borrow_mut().tick(clock.now());
                if state.is_completed() {
                    // Releases the timer from inside its own run
                    let handle = slot.borrow_mut().take();
                    drop(handle);
                }
            }),
        );
        *self.ticker.borrow_mut() = Some(handle);
        state
    }

    /// Cancel the timer and freeze the display as it is.
    pub fn stop(&self) {
        self.countdown.borrow_mut().stop();
        let handle = self.ticker.borrow_mut().take();
        if handle.is_some() {
            tracing::debug!("countdown stopped");
        }
    }
}
