//! Browser console logging.
//!
//! A `tracing` Layer that forwards every event to the console method
//! matching its level, so `RUST_LOG`-style filtering works in the page:
//!
//! ```text
//! wedding_site::behaviors::countdown: countdown started target=2026-09-05 04:00:00 UTC
//! ```

use std::fmt::Write as FmtWrite;
use std::sync::OnceLock;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;
use wedding_core::{SiteError, SiteResult};

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Where formatted lines end up.
pub type ConsoleSink = fn(Level, &str);

/// A tracing Layer that writes events to the browser console.
pub struct ConsoleLayer {
    sink: ConsoleSink,
}

impl ConsoleLayer {
    /// Layer writing through `console.error/warn/info/debug`.
    pub fn browser() -> Self {
        Self {
            sink: browser_console,
        }
    }

    /// Layer writing to a custom sink.
    pub fn with_sink(sink: ConsoleSink) -> Self {
        Self { sink }
    }
}

fn browser_console(level: Level, line: &str) {
    match level {
        Level::ERROR => gloo::console::error!(line),
        Level::WARN => gloo::console::warn!(line),
        Level::INFO => gloo::console::info!(line),
        _ => gloo::console::debug!(line),
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let mut line = String::new();
        let _ = write!(&mut line, "{}", metadata.target());
        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !spans.is_empty() {
                let _ = write!(&mut line, " [{}]", spans.join(" > "));
            }
        }
        let _ = write!(&mut line, ": {}", visitor.message.unwrap_or_default());
        line.push_str(&visitor.fields);

        (self.sink)(*metadata.level(), &line);
    }
}

/// Collects the message and ` key=value` pairs of an event.
#[derive(Default)]
struct LineVisitor {
    message: Option<String>,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            let _ = write!(&mut self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            let _ = write!(&mut self.fields, " {}={}", field.name(), value);
        }
    }
}

/// Parse a filter directive such as `wedding_site=debug,info`.
pub fn parse_filter(directives: &str) -> SiteResult<Targets> {
    directives
        .parse::<Targets>()
        .map_err(|e| SiteError::InvalidFilter(format!("{directives}: {e}")))
}

/// Install the console subscriber. Later calls are no-ops.
pub fn init_logging(directives: &str) {
    if LOGGING_INIT.get().is_some() {
        return;
    }

    let (filter, rejected) = match parse_filter(directives) {
        Ok(filter) => (filter, None),
        Err(e) => (Targets::new().with_default(Level::INFO), Some(e)),
    };

    let subscriber = tracing_subscriber::registry().with(ConsoleLayer::browser().with_filter(filter));
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        let _ = LOGGING_INIT.set(());
    }

    if let Some(e) = rejected {
        tracing::warn!(error = %e, "falling back to info logging");
    }
}
