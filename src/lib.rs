//! Wedding Site page enhancements
//!
//! WebAssembly entry point for the wedding information page. Once the
//! document is parsed it wires up, in order:
//!
//! - smooth scrolling for same-page anchors
//! - the lift effect on info and detail cards
//! - the live countdown
//! - reveal-on-scroll for timeline and schedule items
//! - the RSVP attendance guard
//! - the dormant `launchConfetti()` / `createConfettiPiece()` globals
//!
//! Each behavior is independent: one that fails to register is logged and
//! skipped, and the rest still run.

mod behaviors;
pub mod context;
mod dom;
pub mod logging;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use wedding_core::{SiteConfig, SiteResult};

pub use behaviors::confetti::{create_confetti_piece, launch_confetti};
pub use behaviors::countdown::PageCountdown;
use context::ConfigSource;

/// Module start: run [`init_page`] once the DOM is ready.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let document = gloo::utils::document();
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| boot()).forget();
    } else {
        boot();
    }
}

fn boot() {
    let (config, source) = context::load_site_config();
    logging::init_logging(&config.log_filter);

    match source {
        Some(ConfigSource::Page) => tracing::info!("using page config override"),
        Some(ConfigSource::Rejected(e)) => {
            tracing::warn!(error = %e, "page config override rejected, using defaults")
        }
        _ => {}
    }

    init_page(config);
}

/// Register every page behavior.
pub fn init_page(config: &SiteConfig) {
    let span = tracing::info_span!("init_page");
    let _guard = span.enter();

    report("smooth scroll", behaviors::smooth_scroll::register(config));
    report("card hover", behaviors::card_hover::register(config));

    match behaviors::countdown::attach(config) {
        Ok(Some(timer)) => {
            timer.start();
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "countdown not started"),
    }

    report("reveal", behaviors::reveal::register(config));
    report("rsvp guard", behaviors::rsvp_guard::register(config));
    report("confetti", behaviors::confetti::install_globals());

    tracing::info!("page enhancements ready");
}

fn report<T: std::fmt::Debug>(behavior: &str, result: SiteResult<T>) {
    match result {
        Ok(found) => tracing::debug!(behavior, ?found, "behavior registered"),
        Err(e) => tracing::warn!(behavior, error = %e, "behavior not registered"),
    }
}
