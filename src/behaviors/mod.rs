//! DOM bindings for each page behavior.
//!
//! Every `register`/`attach` function queries its elements once, wires its
//! listeners or timers, and reports what it found. Missing elements are not
//! errors; only failing browser calls are.

pub mod card_hover;
pub mod confetti;
pub mod countdown;
pub mod reveal;
pub mod rsvp_guard;
pub mod smooth_scroll;
