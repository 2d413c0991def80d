use super::ErrorKind;

pub const RATE_LIMIT_TEXT: &str =
    "Too many requests! Please wait a moment before sending another message.";
pub const QUOTA_EXCEEDED_TEXT: &str = "API quota exceeded. Please try again later.";
pub const AUTH_ERROR_TEXT: &str = "Authentication error. Please contact support.";
pub const GENERIC_ERROR_TEXT: &str = "Sorry, I encountered an error. Please try again.";
pub const NETWORK_ERROR_TEXT: &str = "Network error. Please check your connection and try again.";

/// How one client request ended, as seen from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The endpoint answered with a reply.
    Reply(String),
    /// The endpoint answered with an error response.
    Failed {
        kind: Option<ErrorKind>,
        error: Option<String>,
    },
    /// No response was received at all.
    NetworkFailure,
}

impl ReplyOutcome {
    /// Text of the bot message appended for this outcome.
    pub fn display_text(&self) -> String {
        match self {
            ReplyOutcome::Reply(text) => text.clone(),
            ReplyOutcome::Failed { kind, error } => match (kind, error) {
                (Some(ErrorKind::RateLimit), _) => RATE_LIMIT_TEXT.to_string(),
                (Some(ErrorKind::QuotaExceeded), _) => QUOTA_EXCEEDED_TEXT.to_string(),
                (Some(ErrorKind::AuthError), _) => AUTH_ERROR_TEXT.to_string(),
                (_, Some(error)) => error.clone(),
                (_, None) => GENERIC_ERROR_TEXT.to_string(),
            },
            ReplyOutcome::NetworkFailure => NETWORK_ERROR_TEXT.to_string(),
        }
    }

    pub fn is_reply(&self) -> bool {
        matches!(self, ReplyOutcome::Reply(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(kind: Option<ErrorKind>, error: Option<&str>) -> ReplyOutcome {
        ReplyOutcome::Failed {
            kind,
            error: error.map(String::from),
        }
    }

    #[test]
    fn test_classified_errors_use_fixed_text() {
        assert_eq!(
            failed(Some(ErrorKind::RateLimit), Some("raw")).display_text(),
            RATE_LIMIT_TEXT
        );
        assert_eq!(
            failed(Some(ErrorKind::QuotaExceeded), Some("raw")).display_text(),
            QUOTA_EXCEEDED_TEXT
        );
        assert_eq!(
            failed(Some(ErrorKind::AuthError), None).display_text(),
            AUTH_ERROR_TEXT
        );
    }

    #[test]
    fn test_unclassified_errors_surface_raw_text() {
        assert_eq!(
            failed(Some(ErrorKind::ServerError), Some("model overloaded")).display_text(),
            "model overloaded"
        );
        assert_eq!(
            failed(None, Some("Invalid message format")).display_text(),
            "Invalid message format"
        );
        assert_eq!(failed(None, None).display_text(), GENERIC_ERROR_TEXT);
    }

    #[test]
    fn test_reply_and_network_failure() {
        assert_eq!(ReplyOutcome::Reply("Hi there".into()).display_text(), "Hi there");
        assert_eq!(ReplyOutcome::NetworkFailure.display_text(), NETWORK_ERROR_TEXT);
    }
}
