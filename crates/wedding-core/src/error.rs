//! Error types for the wedding site

use thiserror::Error;

/// Main error type for wedding site operations
#[derive(Error, Debug)]
pub enum SiteError {
    /// A configuration value is out of range or empty
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The config override document is not valid JSON for [`crate::SiteConfig`]
    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The countdown target does not map to a single instant in the local zone
    #[error("Invalid target date: {0}")]
    InvalidTargetDate(String),

    /// A browser API call threw
    #[error("DOM error: {0}")]
    Dom(String),

    /// The log filter directive could not be parsed
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
}

/// Result type alias using SiteError
pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SiteError::Dom("querySelector failed".to_string());
        assert_eq!(format!("{}", err), "DOM error: querySelector failed");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let site_err: SiteError = json_err.into();
        assert!(matches!(site_err, SiteError::Json(_)));
    }
}
