//! Live countdown in the `#countdown` element.

use gloo::timers::callback::Interval;
use web_sys::Element;
use wedding_core::{
    Countdown, CountdownFields, CountdownTimer, CountdownView, Repeater, SiteConfig, SiteResult,
    SystemClock,
};

use crate::context;

const LABELS: [&str; 4] = ["Days", "Hours", "Minutes", "Seconds"];

/// Markup for the four countdown fields.
pub fn countdown_markup(fields: &CountdownFields) -> String {
    let values = [fields.days, fields.hours, fields.minutes, fields.seconds];
    let items: String = values
        .iter()
        .zip(LABELS)
        .map(|(value, label)| {
            format!(
                r#"<div class="countdown-item"><span class="countdown-number">{value}</span><span class="countdown-label">{label}</span></div>"#
            )
        })
        .collect();
    format!(r#"<div class="countdown-timer">{items}</div>"#)
}

/// Markup shown once the wedding has started.
pub fn complete_markup(message: &str) -> String {
    format!("<h2>{message}</h2>")
}

/// Renders into the display element.
pub struct CountdownElement {
    element: Element,
}

impl CountdownView for CountdownElement {
    fn show_remaining(&mut self, fields: &CountdownFields) {
        self.element.set_inner_html(&countdown_markup(fields));
    }

    fn show_complete(&mut self, message: &str) {
        self.element.set_inner_html(&complete_markup(message));
    }
}

/// Browser `setInterval` through gloo.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalRepeater;

impl Repeater for IntervalRepeater {
    type Handle = Interval;

    fn every(&self, period_ms: u32, mut task: Box<dyn FnMut()>) -> Interval {
        // wasm-bindgen defers freeing the closure if it is dropped mid-run
        Interval::new(period_ms, move || task())
    }
}

/// The countdown as it runs on the page.
pub type PageCountdown = CountdownTimer<CountdownElement, SystemClock, IntervalRepeater>;

/// Bind to the configured display element.
///
/// Returns `Ok(None)` when the page has no display element; the countdown
/// then stays inert for the session.
pub fn attach(config: &SiteConfig) -> SiteResult<Option<PageCountdown>> {
    let Some(element) = gloo::utils::document().get_element_by_id(&config.countdown.element_id)
    else {
        tracing::debug!(id = %config.countdown.element_id, "no countdown element");
        return Ok(None);
    };

    let target = context::countdown_target(config)?;
    let countdown = Countdown::new(
        target,
        config.countdown.complete_message.clone(),
        CountdownElement { element },
    );

    Ok(Some(CountdownTimer::new(
        countdown,
        SystemClock,
        IntervalRepeater,
        config.countdown.tick_ms,
    )))
}
