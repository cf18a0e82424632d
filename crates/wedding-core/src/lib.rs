//! Wedding Site Core Library
//!
//! Browser-independent logic behind the wedding page enhancements.
//!
//! ## Overview
//!
//! Each page behavior is split into a small piece of reactive logic that
//! lives here and a thin DOM binding in the `wedding-site` crate. The logic
//! talks to the page only through view traits, so every behavior can be
//! driven natively with fake views, a [`ManualClock`] and a
//! [`sim::VirtualScheduler`].
//!
//! | Behavior | Logic | View seam |
//! |----------|-------|-----------|
//! | Smooth scroll | [`scroll::handle_anchor_click`] | [`ScrollSurface`] |
//! | Card hover | [`hover::lift_transform`] | none |
//! | Countdown | [`Countdown`], [`CountdownTimer`] | [`CountdownView`] + [`Repeater`] |
//! | Reveal on scroll | [`RevealTracker`] | [`RevealView`] |
//! | RSVP guard | [`rsvp::guard_submission`] | none |
//! | Confetti | [`ConfettiEmitter`] | [`ConfettiStage`] + [`Scheduler`] |
//!
//! ## Quick Start
//!
//! ```ignore
//! use wedding_core::{Countdown, SiteConfig, SystemClock, Clock};
//!
//! let config = SiteConfig::default();
//! let target = wedding_core::time::resolve_target(config.countdown.target, &chrono::Local)?;
//! let mut countdown = Countdown::new(target, config.countdown.complete_message.clone(), view);
//! countdown.start(SystemClock.now());
//! ```

pub mod config;
pub mod confetti;
pub mod countdown;
pub mod error;
pub mod hover;
pub mod reveal;
pub mod rsvp;
pub mod scroll;
pub mod sim;
pub mod time;
pub mod timer;

// Re-exports
pub use config::{
    ConfettiOptions, CountdownOptions, HoverOptions, RevealOptions, RsvpOptions, Selectors,
    SiteConfig,
};
pub use confetti::{
    ConfettiEmitter, ConfettiPiece, ConfettiStage, FixedRandom, RandomSource, SeededRandom,
    GLYPHS,
};
pub use countdown::{Countdown, CountdownFields, CountdownState, CountdownTimer, CountdownView};
pub use error::{SiteError, SiteResult};
pub use hover::Pointer;
pub use reveal::{IntersectionSample, RevealStyle, RevealTracker, RevealView};
pub use rsvp::{Attendance, SubmitVerdict};
pub use scroll::{AnchorClick, ScrollSurface};
pub use time::{Clock, ManualClock, SystemClock};
pub use timer::{Repeater, Scheduler};
