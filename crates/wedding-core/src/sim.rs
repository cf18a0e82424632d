//! Deterministic virtual-time scheduler.
//!
//! Stands in for browser timers wherever a behavior schedules delayed work,
//! so tests can step time forward and observe exactly which callbacks ran.
//!
//! ```ignore
//! let scheduler = VirtualScheduler::new();
//! scheduler.after(100, Box::new(|| println!("fired")));
//! scheduler.advance(99);   // nothing
//! scheduler.advance(1);    // "fired"
//!
//! let ticking = scheduler.every(1000, Box::new(|| println!("tick")));
//! scheduler.advance(3000); // three ticks
//! drop(ticking);           // cancelled
//! ```

use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::rc::{Rc, Weak};

use crate::timer::{Repeater, Scheduler};

type Task = Box<dyn FnOnce()>;
type RepeatingTask = Box<dyn FnMut()>;

enum Entry {
    Once(Task),
    /// Next run of repeating timer `id`
    Repeat { id: u64, period_ms: u64 },
}

enum Due {
    Once(Task),
    Repeat {
        id: u64,
        period_ms: u64,
        task: RepeatingTask,
    },
}

#[derive(Default)]
struct Inner {
    now_ms: u64,
    next_seq: u64,
    /// (due, seq); seq keeps same-instant tasks in scheduling order
    queue: BinaryHeap<Reverse<(u64, u64)>>,
    entries: HashMap<u64, Entry>,
    /// Repeating tasks between runs, by timer id
    repeating: HashMap<u64, RepeatingTask>,
    /// Repeating timers whose handle is still alive
    live: HashSet<u64>,
}

impl Inner {
    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn push(&mut self, due: u64, entry: Entry) {
        let seq = self.next_seq();
        self.queue.push(Reverse((due, seq)));
        self.entries.insert(seq, entry);
    }

    fn pending_once(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry, Entry::Once(_)))
            .count()
    }
}

/// Single-threaded timer queue driven by [`VirtualScheduler::advance`].
///
/// Clones share the same queue.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    inner: Rc<RefCell<Inner>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual milliseconds elapsed since creation.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Number of one-shot tasks not yet run plus live repeating timers.
    pub fn pending(&self) -> usize {
        let inner = self.inner.borrow();
        inner.pending_once() + inner.live.len()
    }

    /// Number of repeating timers whose handle has not been dropped.
    pub fn pending_repeating(&self) -> usize {
        self.inner.borrow().live.len()
    }

    /// Move time forward by `ms`, running every task that falls due in order.
    ///
    /// Tasks scheduled by running tasks are honored if they fall due within
    /// the same window.
    pub fn advance(&self, ms: u64) {
        let until = self.now_ms() + ms;
        loop {
            let due = {
                let mut inner = self.inner.borrow_mut();
                match inner.queue.peek() {
                    Some(Reverse((due, _))) if *due <= until => {}
                    _ => break,
                }
                let Some(Reverse((due, seq))) = inner.queue.pop() else {
                    break;
                };
                inner.now_ms = due;
                match inner.entries.remove(&seq) {
                    Some(Entry::Once(task)) => Some(Due::Once(task)),
                    Some(Entry::Repeat { id, period_ms }) => inner
                        .repeating
                        .remove(&id)
                        .map(|task| Due::Repeat { id, period_ms, task }),
                    None => None,
                }
            };
            // Run outside the borrow so the task may schedule or cancel work
            match due {
                Some(Due::Once(task)) => task(),
                Some(Due::Repeat {
                    id,
                    period_ms,
                    mut task,
                }) => {
                    task();
                    let cancelled = {
                        let mut inner = self.inner.borrow_mut();
                        if inner.live.contains(&id) {
                            inner.repeating.insert(id, task);
                            let next = inner.now_ms + period_ms;
                            inner.push(next, Entry::Repeat { id, period_ms });
                            None
                        } else {
                            Some(task)
                        }
                    };
                    // Captures may own other handles; drop them unborrowed
                    drop(cancelled);
                }
                None => {}
            }
        }
        self.inner.borrow_mut().now_ms = until;
    }
}

impl Scheduler for VirtualScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let mut inner = self.inner.borrow_mut();
        let due = inner.now_ms + u64::from(delay_ms);
        inner.push(due, Entry::Once(task));
    }
}

/// Handle of a repeating virtual timer. Dropping it cancels the timer.
pub struct RepeatHandle {
    inner: Weak<RefCell<Inner>>,
    id: u64,
}

impl Drop for RepeatHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let task = {
                let mut inner = inner.borrow_mut();
                inner.live.remove(&self.id);
                inner.repeating.remove(&self.id)
            };
            drop(task);
        }
    }
}

impl Repeater for VirtualScheduler {
    type Handle = RepeatHandle;

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> RepeatHandle {
        // A zero period would never let time move past the first run
        let period_ms = u64::from(period_ms.max(1));
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_seq();
        inner.live.insert(id);
        inner.repeating.insert(id, task);
        let due = inner.now_ms + period_ms;
        inner.push(due, Entry::Repeat { id, period_ms });
        RepeatHandle {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_runs_in_due_order() {
        let scheduler = VirtualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(300, "c"), (100, "a"), (200, "b")] {
            let log = log.clone();
            scheduler.after(delay, Box::new(move || log.borrow_mut().push(name)));
        }

        scheduler.advance(150);
        assert_eq!(*log.borrow(), vec!["a"]);

        scheduler.advance(1000);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now_ms(), 1150);
    }

    #[test]
    fn test_nested_scheduling() {
        let scheduler = VirtualScheduler::new();
        let fired = Rc::new(Cell::new(false));

        let inner_scheduler = scheduler.clone();
        let inner_fired = fired.clone();
        scheduler.after(
            10,
            Box::new(move || {
                inner_scheduler.after(10, Box::new(move || inner_fired.set(true)));
            }),
        );

        scheduler.advance(19);
        assert!(!fired.get());
        scheduler.advance(1);
        assert!(fired.get());
    }

    #[test]
    fn test_repeating_until_dropped() {
        let scheduler = VirtualScheduler::new();
        let runs = Rc::new(Cell::new(0));

        let counter = runs.clone();
        let handle = scheduler.every(100, Box::new(move || counter.set(counter.get() + 1)));
        assert_eq!(scheduler.pending_repeating(), 1);

        scheduler.advance(350);
        assert_eq!(runs.get(), 3);

        drop(handle);
        assert_eq!(scheduler.pending_repeating(), 0);
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(1000);
        assert_eq!(runs.get(), 3);
    }

    #[test]
    fn test_repeating_cancelled_from_own_run() {
        let scheduler = VirtualScheduler::new();
        let runs = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<RepeatHandle>>> = Rc::new(RefCell::new(None));

        let counter = runs.clone();
        let own = slot.clone();
        let handle = scheduler.every(
            10,
            Box::new(move || {
                counter.set(counter.get() + 1);
                if counter.get() == 2 {
                    own.borrow_mut().take();
                }
            }),
        );
        *slot.borrow_mut() = Some(handle);

        scheduler.advance(100);
        assert_eq!(runs.get(), 2);
        assert_eq!(scheduler.pending_repeating(), 0);
    }
}
