//! Clocks and target date resolution.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};

use crate::error::{SiteError, SiteResult};

/// Source of "now" for the countdown.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock. On wasm this reads JS `Date.now()` through chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for simulated time.
///
/// Clones share the same instant, so a test can hand one clone to the code
/// under test and advance the other.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Resolve a naive local target date in `tz` to a UTC instant.
///
/// Ambiguous local times (clocks turned back) resolve to the earlier
/// instant. Local times skipped by a forward transition are rejected.
pub fn resolve_target<Tz: TimeZone>(target: NaiveDateTime, tz: &Tz) -> SiteResult<DateTime<Utc>> {
    match tz.from_local_datetime(&target) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(SiteError::InvalidTargetDate(format!(
            "{} does not exist in the local time zone",
            target
        ))),
    }
}
