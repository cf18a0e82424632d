//! Site configuration shared by every behavior.
//!
//! Loaded once at start from an optional JSON island in the page:
//!
//! ```html
//! <script type="application/json" id="wedding-config">
//!   { "countdown": { "target": "2026-09-05T16:30:00" } }
//! </script>
//! ```

use std::sync::OnceLock;

use wedding_core::{SiteConfig, SiteResult};

/// Id of the element carrying the config override.
pub const CONFIG_ELEMENT_ID: &str = "wedding-config";

static SITE_CONFIG: OnceLock<SiteConfig> = OnceLock::new();

/// Where the config came from.
#[derive(Debug)]
pub enum ConfigSource {
    Defaults,
    Page,
    /// The page override was rejected; defaults are in use
    Rejected(wedding_core::SiteError),
}

/// Resolve the config from the override document text, if any.
pub fn resolve_config(override_json: Option<&str>) -> (SiteConfig, ConfigSource) {
    match override_json.map(str::trim).filter(|json| !json.is_empty()) {
        None => (SiteConfig::default(), ConfigSource::Defaults),
        Some(json) => match SiteConfig::from_json(json) {
            Ok(config) => (config, ConfigSource::Page),
            Err(e) => (SiteConfig::default(), ConfigSource::Rejected(e)),
        },
    }
}

/// Read the override element from the current document.
fn page_override() -> Option<String> {
    gloo::utils::document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
}

/// Load the config from the page and store it for the session.
///
/// The source is only reported by the call that actually read the page;
/// later calls return the stored config and `None`.
pub fn load_site_config() -> (&'static SiteConfig, Option<ConfigSource>) {
    load_into(&SITE_CONFIG, page_override)
}

/// The session config. Reads the page override if nothing has loaded it yet.
pub fn site_config() -> &'static SiteConfig {
    load_site_config().0
}

fn load_into(
    cell: &OnceLock<SiteConfig>,
    read: impl FnOnce() -> Option<String>,
) -> (&SiteConfig, Option<ConfigSource>) {
    if let Some(config) = cell.get() {
        return (config, None);
    }
    let (config, source) = resolve_config(read().as_deref());
    (cell.get_or_init(|| config), Some(source))
}

/// Resolve the configured countdown target in the visitor's time zone.
pub fn countdown_target(config: &SiteConfig) -> SiteResult<chrono::DateTime<chrono::Utc>> {
    wedding_core::time::resolve_target(config.countdown.target, &chrono::Local)
}
