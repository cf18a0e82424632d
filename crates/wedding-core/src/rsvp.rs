//! RSVP form guard.
//!
//! The only client-side check is that an attendance choice was made; every
//! other field is validated by the server.

/// Attendance choice carried by the checked input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attendance {
    /// `yes`
    Accept,
    /// `no`
    Decline,
    /// Any other value the page's form uses
    Other(String),
}

impl Attendance {
    pub fn from_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Attendance::Accept,
            "no" => Attendance::Decline,
            _ => Attendance::Other(value.to_string()),
        }
    }
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitVerdict {
    /// Let the browser submit unchanged
    Proceed(Attendance),
    /// Cancel the submission and warn the guest
    Block { message: String },
}

impl SubmitVerdict {
    pub fn is_blocked(&self) -> bool {
        matches!(self, SubmitVerdict::Block { .. })
    }
}

/// Decide a submission given the value of the checked attendance input.
pub fn guard_submission(checked_value: Option<&str>, missing_message: &str) -> SubmitVerdict {
    match checked_value {
        Some(value) => SubmitVerdict::Proceed(Attendance::from_value(value)),
        None => {
            tracing::info!("rsvp blocked: no attendance choice");
            SubmitVerdict::Block {
                message: missing_message.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_values() {
        assert_eq!(Attendance::from_value("yes"), Attendance::Accept);
        assert_eq!(Attendance::from_value("No"), Attendance::Decline);
        assert_eq!(
            Attendance::from_value("maybe"),
            Attendance::Other("maybe".to_string())
        );
    }

    #[test]
    fn test_missing_choice_blocks() {
        let verdict = guard_submission(None, "pick one");
        assert_eq!(
            verdict,
            SubmitVerdict::Block {
                message: "pick one".to_string()
            }
        );
    }

    #[test]
    fn test_checked_choice_proceeds() {
        let verdict = guard_submission(Some("no"), "pick one");
        assert_eq!(verdict, SubmitVerdict::Proceed(Attendance::Decline));
        assert!(!verdict.is_blocked());
    }
}
