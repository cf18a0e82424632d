//! Integration tests for the page behaviors
//!
//! Each behavior is driven through its view seam with fake views, a manual
//! clock and the virtual scheduler, the way the browser would drive it.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use wedding_core::scroll::handle_anchor_click;
use wedding_core::sim::VirtualScheduler;
use wedding_core::time::resolve_target;
use wedding_core::{
    rsvp, Clock, ConfettiEmitter, ConfettiOptions, ConfettiPiece, ConfettiStage, Countdown,
    CountdownFields, CountdownState, CountdownView, FixedRandom, IntersectionSample,
    CountdownTimer, ManualClock, RevealOptions, RevealStyle, RevealTracker, RevealView,
    ScrollSurface, SeededRandom, SiteResult,
};

// ============================================================================
// Smooth scroll
// ============================================================================

struct FakePage {
    ids: HashSet<&'static str>,
    scrolls: RefCell<Vec<String>>,
}

impl FakePage {
    fn with_ids(ids: &[&'static str]) -> Self {
        Self {
            ids: ids.iter().copied().collect(),
            scrolls: RefCell::new(Vec::new()),
        }
    }
}

impl ScrollSurface for FakePage {
    type Target = String;

    fn find(&self, id: &str) -> Option<String> {
        self.ids.get(id).map(|id| id.to_string())
    }

    fn scroll_into_view(&self, target: &String) {
        self.scrolls.borrow_mut().push(target.clone());
    }
}

#[test]
fn test_anchor_click_scrolls_to_matching_element_once() {
    let page = FakePage::with_ids(&["details", "rsvp"]);

    let click = handle_anchor_click("#rsvp", &page);

    assert!(click.prevent_default);
    assert!(click.scrolled);
    assert_eq!(*page.scrolls.borrow(), vec!["rsvp".to_string()]);

    handle_anchor_click("#rsvp", &page);
    assert_eq!(page.scrolls.borrow().len(), 2, "one scroll per click");
}

#[test]
fn test_anchor_click_without_target_does_nothing() {
    let page = FakePage::with_ids(&["details"]);

    let click = handle_anchor_click("#missing", &page);
    assert!(click.prevent_default);
    assert!(!click.scrolled);

    let click = handle_anchor_click("#", &page);
    assert!(click.prevent_default);
    assert!(!click.scrolled);

    assert!(page.scrolls.borrow().is_empty());
}

#[test]
fn test_external_link_not_intercepted() {
    let page = FakePage::with_ids(&["details"]);
    let click = handle_anchor_click("/registry", &page);
    assert!(!click.prevent_default);
    assert!(page.scrolls.borrow().is_empty());
}

// ============================================================================
// Countdown
// ============================================================================

#[derive(Clone, Default)]
struct Display {
    content: Rc<RefCell<String>>,
    writes: Rc<Cell<usize>>,
}

impl CountdownView for Display {
    fn show_remaining(&mut self, fields: &CountdownFields) {
        *self.content.borrow_mut() = format!(
            "{}d {}h {}m {}s",
            fields.days, fields.hours, fields.minutes, fields.seconds
        );
        self.writes.set(self.writes.get() + 1);
    }

    fn show_complete(&mut self, message: &str) {
        *self.content.borrow_mut() = message.to_string();
        self.writes.set(self.writes.get() + 1);
    }
}

fn wedding_target() -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(2026, 9, 5)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    resolve_target(naive, &Utc).unwrap()
}

#[test]
fn test_countdown_one_hour_before() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 9, 4, 23, 0, 0).unwrap());
    let display = Display::default();
    let mut countdown = Countdown::new(wedding_target(), "wedding day", display.clone());

    countdown.start(clock.now());

    assert_eq!(*display.content.borrow(), "0d 1h 0m 0s");
}

#[test]
fn test_countdown_ticks_down_each_second() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 9, 4, 23, 59, 58).unwrap());
    let display = Display::default();
    let mut countdown = Countdown::new(wedding_target(), "wedding day", display.clone());

    countdown.start(clock.now());
    assert_eq!(*display.content.borrow(), "0d 0h 0m 2s");

    clock.advance(Duration::seconds(1));
    countdown.tick(clock.now());
    assert_eq!(*display.content.borrow(), "0d 0h 0m 1s");
}

#[test]
fn test_countdown_completion_is_final() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 9, 4, 23, 59, 59).unwrap());
    let display = Display::default();
    let mut countdown = Countdown::new(wedding_target(), "wedding day", display.clone());

    assert_eq!(countdown.start(clock.now()), CountdownState::Running);

    clock.advance(Duration::seconds(2));
    assert_eq!(countdown.tick(clock.now()), CountdownState::Completed);
    assert_eq!(*display.content.borrow(), "wedding day");
    let writes = display.writes.get();

    for _ in 0..10 {
        clock.advance(Duration::seconds(1));
        assert_eq!(countdown.tick(clock.now()), CountdownState::Completed);
    }
    assert_eq!(*display.content.borrow(), "wedding day");
    assert_eq!(display.writes.get(), writes, "no writes after completion");
}

#[test]
fn test_countdown_loaded_after_wedding() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap());
    let display = Display::default();
    let mut countdown = Countdown::new(wedding_target(), "wedding day", display.clone());

    assert_eq!(countdown.start(clock.now()), CountdownState::Completed);
    assert_eq!(*display.content.borrow(), "wedding day");
    assert_eq!(display.writes.get(), 1);
}

type VirtualCountdown = CountdownTimer<Display, ManualClock, VirtualScheduler>;

fn countdown_timer(
    now: DateTime<Utc>,
) -> (VirtualCountdown, Display, ManualClock, VirtualScheduler) {
    let clock = ManualClock::new(now);
    let scheduler = VirtualScheduler::new();
    let display = Display::default();
    let countdown = Countdown::new(wedding_target(), "wedding day", display.clone());
    let timer = CountdownTimer::new(countdown, clock.clone(), scheduler.clone(), 1000);
    (timer, display, clock, scheduler)
}

/// Move wall clock and timers forward together, one second at a time.
fn run_seconds(clock: &ManualClock, scheduler: &VirtualScheduler, seconds: u32) {
    for _ in 0..seconds {
        clock.advance(Duration::seconds(1));
        scheduler.advance(1000);
    }
}

#[test]
fn test_countdown_timer_released_on_completion() {
    let (timer, display, clock, scheduler) =
        countdown_timer(Utc.with_ymd_and_hms(2026, 9, 4, 23, 59, 58).unwrap());

    assert_eq!(timer.start(), CountdownState::Running);
    assert_eq!(scheduler.pending_repeating(), 1);

    run_seconds(&clock, &scheduler, 2);
    assert_eq!(*display.content.borrow(), "0d 0h 0m 0s");
    assert_eq!(scheduler.pending_repeating(), 1);

    run_seconds(&clock, &scheduler, 1);
    assert_eq!(timer.state(), CountdownState::Completed);
    assert_eq!(*display.content.borrow(), "wedding day");
    assert!(!timer.is_ticking());
    assert_eq!(scheduler.pending_repeating(), 0);

    let writes = display.writes.get();
    run_seconds(&clock, &scheduler, 5);
    assert_eq!(display.writes.get(), writes, "no writes after completion");
}

#[test]
fn test_countdown_timer_stop_releases_timer() {
    let (timer, display, clock, scheduler) =
        countdown_timer(Utc.with_ymd_and_hms(2026, 9, 4, 12, 0, 0).unwrap());

    timer.start();
    run_seconds(&clock, &scheduler, 3);
    assert_eq!(*display.content.borrow(), "0d 11h 59m 57s");

    timer.stop();
    assert_eq!(scheduler.pending_repeating(), 0);

    run_seconds(&clock, &scheduler, 3);
    assert_eq!(*display.content.borrow(), "0d 11h 59m 57s", "display frozen");
}

#[test]
fn test_countdown_timer_not_created_after_wedding() {
    let (timer, display, _clock, scheduler) =
        countdown_timer(Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap());

    assert_eq!(timer.start(), CountdownState::Completed);
    assert_eq!(*display.content.borrow(), "wedding day");
    assert_eq!(scheduler.pending_repeating(), 0);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_countdown_timer_double_start_keeps_one_timer() {
    let (timer, display, clock, scheduler) =
        countdown_timer(Utc.with_ymd_and_hms(2026, 9, 4, 23, 0, 0).unwrap());

    timer.start();
    timer.start();
    assert_eq!(scheduler.pending_repeating(), 1);
    assert_eq!(display.writes.get(), 1, "second start renders nothing");

    run_seconds(&clock, &scheduler, 1);
    assert_eq!(display.writes.get(), 2, "one write per tick");
}

// ============================================================================
// RSVP guard
// ============================================================================

#[test]
fn test_rsvp_guard() {
    let blocked = rsvp::guard_submission(None, "Please choose");
    assert!(blocked.is_blocked());

    let allowed = rsvp::guard_submission(Some("yes"), "Please choose");
    assert_eq!(
        allowed,
        wedding_core::SubmitVerdict::Proceed(wedding_core::Attendance::Accept)
    );
}

// ============================================================================
// Confetti
// ============================================================================

#[derive(Default)]
struct StageState {
    next_id: usize,
    attached: Vec<usize>,
    falling: Vec<usize>,
}

#[derive(Clone, Default)]
struct FakeStage(Rc<RefCell<StageState>>);

impl FakeStage {
    fn attached(&self) -> Vec<usize> {
        self.0.borrow().attached.clone()
    }
}

impl ConfettiStage for FakeStage {
    type Particle = usize;

    fn spawn(&self, _piece: &ConfettiPiece) -> SiteResult<usize> {
        let mut state = self.0.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.attached.push(id);
        Ok(id)
    }

    fn begin_fall(&self, particle: &usize, _piece: &ConfettiPiece) {
        self.0.borrow_mut().falling.push(*particle);
    }

    fn remove(&self, particle: &usize) {
        self.0.borrow_mut().attached.retain(|id| id != particle);
    }
}

#[test]
fn test_confetti_pieces_removed_on_their_own_schedule() {
    let scheduler = VirtualScheduler::new();
    let stage = FakeStage::default();
    // glyph, left, fall, sway per piece: falls of 2000, 3000 and 4000 ms
    let rng = FixedRandom::new(vec![
        0.0, 0.1, 0.0, 0.5, //
        0.3, 0.2, 0.5, 0.5, //
        0.6, 0.3, 0.999_9, 0.5,
    ]);
    let mut emitter =
        ConfettiEmitter::new(stage.clone(), scheduler.clone(), rng, ConfettiOptions::default());

    let pieces: Vec<_> = (0..3).map(|_| emitter.create_piece().unwrap()).collect();
    assert_eq!(stage.attached(), vec![0, 1, 2], "appended immediately");

    scheduler.advance(100);
    assert_eq!(stage.0.borrow().falling, vec![0, 1, 2]);

    scheduler.advance(pieces[0].fall_ms as u64 - 1);
    assert_eq!(stage.attached(), vec![0, 1, 2]);

    scheduler.advance(1);
    assert_eq!(stage.attached(), vec![1, 2]);

    scheduler.advance(u64::from(pieces[1].lifetime_ms() - pieces[0].lifetime_ms()));
    assert_eq!(stage.attached(), vec![2]);

    scheduler.advance(u64::from(pieces[2].lifetime_ms() - pieces[1].lifetime_ms()));
    assert!(stage.attached().is_empty());
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_launch_spawns_full_burst() {
    let scheduler = VirtualScheduler::new();
    let stage = FakeStage::default();
    let mut emitter = ConfettiEmitter::new(
        stage.clone(),
        scheduler.clone(),
        SeededRandom::new(42),
        ConfettiOptions::default(),
    );

    assert_eq!(emitter.launch(), 50);
    assert_eq!(stage.attached().len(), 50);

    // Longest possible lifetime is 4000 + 100 ms
    scheduler.advance(4100);
    assert!(stage.attached().is_empty());
}

// ============================================================================
// Reveal
// ============================================================================

#[derive(Clone, Default)]
struct ItemStyles(Rc<RefCell<Vec<Option<RevealStyle>>>>);

impl RevealView for ItemStyles {
    fn apply(&mut self, item: usize, style: &RevealStyle) {
        let mut styles = self.0.borrow_mut();
        if styles.len() <= item {
            styles.resize(item + 1, None);
        }
        styles[item] = Some(*style);
    }
}

#[test]
fn test_reveal_after_threshold_crossing() {
    let styles = ItemStyles::default();
    let mut tracker = RevealTracker::new(RevealOptions::default(), styles.clone());
    tracker.register(2);

    let before = styles.0.borrow()[0].unwrap();
    assert_eq!(before.opacity, 0.0);
    assert_eq!(before.translate_x_px, -20);

    tracker.observe(IntersectionSample {
        item: 0,
        is_intersecting: true,
        intersection_ratio: 0.1,
    });
    assert_eq!(styles.0.borrow()[0].unwrap().opacity, 0.0);

    tracker.observe(IntersectionSample {
        item: 0,
        is_intersecting: true,
        intersection_ratio: 0.2,
    });
    let after = styles.0.borrow()[0].unwrap();
    assert_eq!(after.opacity, 1.0);
    assert_eq!(after.translate_x_px, 0);

    // The other item is untouched
    assert_eq!(styles.0.borrow()[1].unwrap().opacity, 0.0);
}
