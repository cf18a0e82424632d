//! Site configuration.
//!
//! Every value has a default matching the published page, so a page without
//! an override document behaves exactly like the stock site. Pages can
//! override any subset of fields through a JSON document:
//!
//! ```json
//! {
//!   "countdown": { "target": "2026-09-05T16:30:00" },
//!   "confetti": { "burst_size": 80 },
//!   "log_filter": "wedding_site=debug,info"
//! }
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};

/// Largest leftward shift a hidden reveal item can take.
const MAX_OFFSET_PX: u32 = i32::MAX as u32;

/// Top-level configuration for all page behaviors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub countdown: CountdownOptions,
    pub selectors: Selectors,
    pub hover: HoverOptions,
    pub reveal: RevealOptions,
    pub confetti: ConfettiOptions,
    pub rsvp: RsvpOptions,
    /// Directive string for `tracing_subscriber::filter::Targets`
    pub log_filter: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            countdown: CountdownOptions::default(),
            selectors: Selectors::default(),
            hover: HoverOptions::default(),
            reveal: RevealOptions::default(),
            confetti: ConfettiOptions::default(),
            rsvp: RsvpOptions::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse an override document and validate the result.
    pub fn from_json(json: &str) -> SiteResult<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no behavior can work with.
    pub fn validate(&self) -> SiteResult<()> {
        if self.countdown.tick_ms == 0 {
            return Err(SiteError::InvalidConfig(
                "countdown.tick_ms must be positive".into(),
            ));
        }
        if self.countdown.complete_message.trim().is_empty() {
            return Err(SiteError::InvalidConfig(
                "countdown.complete_message must not be empty".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(SiteError::InvalidConfig(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        if !self.reveal.duration_s.is_finite() || self.reveal.duration_s < 0.0 {
            return Err(SiteError::InvalidConfig(format!(
                "reveal.duration_s must be a non-negative number, got {}",
                self.reveal.duration_s
            )));
        }
        if self.reveal.offset_px > MAX_OFFSET_PX {
            return Err(SiteError::InvalidConfig(format!(
                "reveal.offset_px must be at most {}, got {}",
                MAX_OFFSET_PX, self.reveal.offset_px
            )));
        }
        let lifetime_ms = self
            .confetti
            .min_fall_ms
            .checked_add(self.confetti.fall_spread_ms)
            .and_then(|ms| ms.checked_add(self.confetti.start_delay_ms));
        if lifetime_ms.is_none() {
            return Err(SiteError::InvalidConfig(
                "confetti min_fall_ms + fall_spread_ms + start_delay_ms overflows".into(),
            ));
        }
        if self.confetti.burst_size == 0 {
            return Err(SiteError::InvalidConfig(
                "confetti.burst_size must be positive".into(),
            ));
        }
        if self.rsvp.missing_attendance_message.trim().is_empty() {
            return Err(SiteError::InvalidConfig(
                "rsvp.missing_attendance_message must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Countdown timer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountdownOptions {
    /// Wedding date and time in the visitor's local zone
    pub target: NaiveDateTime,
    /// Id of the display element
    pub element_id: String,
    pub tick_ms: u32,
    pub complete_message: String,
}

impl Default for CountdownOptions {
    fn default() -> Self {
        Self {
            target: default_target(),
            element_id: "countdown".to_string(),
            tick_ms: 1000,
            complete_message: "🐧💕 It's our wedding day! 💕🐧".to_string(),
        }
    }
}

fn default_target() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 9, 5)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// CSS selectors for the elements each behavior attaches to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    pub anchors: String,
    pub cards: String,
    pub reveal_items: String,
    pub rsvp_form: String,
    /// `name` of the attendance radio/checkbox group
    pub attendance_field: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            anchors: r##"a[href^="#"]"##.to_string(),
            cards: ".info-card, .detail-card".to_string(),
            reveal_items: ".timeline-item, .schedule-item".to_string(),
            rsvp_form: ".rsvp-form".to_string(),
            attendance_field: "attendance".to_string(),
        }
    }
}

impl Selectors {
    /// Selector matching a checked input of the attendance group.
    pub fn checked_attendance(&self) -> String {
        format!(r#"input[name="{}"]:checked"#, self.attendance_field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoverOptions {
    pub lift_px: u32,
}

impl Default for HoverOptions {
    fn default() -> Self {
        Self { lift_px: 5 }
    }
}

/// Reveal-on-scroll settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealOptions {
    /// Visible fraction at which an item counts as in view
    pub threshold: f64,
    /// Contraction of the viewport's bottom edge
    pub bottom_margin_px: u32,
    /// Horizontal shift of hidden items, to the left
    pub offset_px: u32,
    pub duration_s: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            bottom_margin_px: 50,
            offset_px: 20,
            duration_s: 0.6,
        }
    }
}

impl RevealOptions {
    /// `rootMargin` value for the intersection observer.
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }

    /// CSS `transition` applied to every item up front.
    pub fn transition(&self) -> String {
        format!("all {}s ease", self.duration_s)
    }
}

/// Confetti particle settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfettiOptions {
    pub burst_size: u32,
    /// Delay between spawning a piece and starting its fall
    pub start_delay_ms: u32,
    pub min_fall_ms: u32,
    /// Fall duration is `min_fall_ms + r * fall_spread_ms`
    pub fall_spread_ms: u32,
    /// Sway is drawn from `[-max_sway_px, max_sway_px)`
    pub max_sway_px: u32,
    /// Spawn height above the viewport's top edge
    pub start_top_px: u32,
    pub z_index: i32,
    pub font_size: String,
}

impl Default for ConfettiOptions {
    fn default() -> Self {
        Self {
            burst_size: 50,
            start_delay_ms: 100,
            min_fall_ms: 2000,
            fall_spread_ms: 2000,
            max_sway_px: 100,
            start_top_px: 50,
            z_index: 9999,
            font_size: "1.5rem".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RsvpOptions {
    pub missing_attendance_message: String,
}

impl Default for RsvpOptions {
    fn default() -> Self {
        Self {
            missing_attendance_message: "Please let us know if you'll be attending! 🐧".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_published_page() {
        let config = SiteConfig::default();
        assert_eq!(config.countdown.target.to_string(), "2026-09-05 00:00:00");
        assert_eq!(config.countdown.element_id, "countdown");
        assert_eq!(config.reveal.root_margin(), "0px 0px -50px 0px");
        assert_eq!(config.reveal.transition(), "all 0.6s ease");
        assert_eq!(config.confetti.burst_size, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = SiteConfig::from_json(
            r#"{ "countdown": { "target": "2027-01-01T12:00:00" }, "log_filter": "debug" }"#,
        )
        .unwrap();

        assert_eq!(config.countdown.target.to_string(), "2027-01-01 12:00:00");
        assert_eq!(config.countdown.tick_ms, 1000);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.selectors, Selectors::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SiteConfig::from_json(r#"{ "parallax": true }"#).unwrap_err();
        assert!(matches!(err, SiteError::Json(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = SiteConfig::from_json(r#"{ "reveal": { "threshold": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, SiteError::InvalidConfig(_)));

        let err = SiteConfig::from_json(r#"{ "confetti": { "burst_size": 0 } }"#).unwrap_err();
        assert!(matches!(err, SiteError::InvalidConfig(_)));

        let err = SiteConfig::from_json(r#"{ "countdown": { "tick_ms": 0 } }"#).unwrap_err();
        assert!(matches!(err, SiteError::InvalidConfig(_)));
    }

    #[test]
    fn test_overflowing_values_rejected() {
        let err = SiteConfig::from_json(r#"{ "confetti": { "min_fall_ms": 4294967295 } }"#)
            .unwrap_err();
        assert!(matches!(err, SiteError::InvalidConfig(_)));

        let err = SiteConfig::from_json(
            r#"{ "confetti": { "min_fall_ms": 4294967000, "fall_spread_ms": 200, "start_delay_ms": 100 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SiteError::InvalidConfig(_)));

        let err = SiteConfig::from_json(r#"{ "reveal": { "offset_px": 2147483648 } }"#).unwrap_err();
        assert!(matches!(err, SiteError::InvalidConfig(_)));

        assert!(SiteConfig::from_json(r#"{ "reveal": { "offset_px": 2147483647 } }"#).is_ok());
    }

    #[test]
    fn test_checked_attendance_selector() {
        let selectors = Selectors::default();
        assert_eq!(
            selectors.checked_attendance(),
            r#"input[name="attendance"]:checked"#
        );
    }
}
