//! Block RSVP submissions without an attendance choice.

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use wedding_core::rsvp::guard_submission;
use wedding_core::{SiteConfig, SiteResult, SubmitVerdict};

use crate::dom;

/// Guard the RSVP form if the page has one. Returns whether it was found.
pub fn register(config: &SiteConfig) -> SiteResult<bool> {
    let Some(form) = dom::query(&config.selectors.rsvp_form)? else {
        tracing::debug!("no rsvp form");
        return Ok(false);
    };

    let checked_selector = config.selectors.checked_attendance();
    let message = config.rsvp.missing_attendance_message.clone();
    let scope = form.clone();

    EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let checked = match scope.query_selector(&checked_selector) {
                Ok(checked) => checked,
                Err(e) => {
                    // A broken selector lets the submission through
                    tracing::warn!(error = %dom::js_error(&checked_selector, e), "attendance lookup failed");
                    return;
                }
            };
            let value = checked.map(|element| {
                element
                    .dyn_into::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default()
            });

            match guard_submission(value.as_deref(), &message) {
                SubmitVerdict::Block { message } => {
                    event.prevent_default();
                    gloo::dialogs::alert(&message);
                }
                SubmitVerdict::Proceed(attendance) => {
                    tracing::info!(?attendance, "rsvp submitted");
                }
            }
        },
    )
    .forget();

    tracing::debug!("rsvp guard registered");
    Ok(true)
}
