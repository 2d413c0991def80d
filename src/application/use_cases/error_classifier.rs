use crate::domain::{DomainError, ErrorKind};

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please wait a moment and try again.";
pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "API quota exceeded. Please try again later or check your API key limits.";
pub const AUTH_ERROR_MESSAGE: &str = "Invalid API key. Please check your configuration.";
pub const SERVER_ERROR_FALLBACK: &str = "Failed to process message";

/// Phrases that mark a quota failure as exhaustion rather than throttling.
const QUOTA_EXHAUSTED_PHRASES: [&str; 2] = ["quota exceeded", "insufficient quota"];

/// Result of classifying one upstream failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: u16,
    pub kind: ErrorKind,
    pub message: String,
}

/// One row of the classification table. `message` is lower-cased before the
/// predicate sees it.
struct ClassificationRule {
    kind: ErrorKind,
    status: u16,
    message: &'static str,
    applies: fn(Option<u16>, &str) -> bool,
}

/// Evaluated top to bottom; the first rule that applies wins.
const RULES: [ClassificationRule; 3] = [
    ClassificationRule {
        kind: ErrorKind::RateLimit,
        status: 429,
        message: RATE_LIMIT_MESSAGE,
        applies: is_rate_limited,
    },
    ClassificationRule {
        kind: ErrorKind::QuotaExceeded,
        status: 429,
        message: QUOTA_EXCEEDED_MESSAGE,
        applies: is_quota_exhausted,
    },
    ClassificationRule {
        kind: ErrorKind::AuthError,
        status: 401,
        message: AUTH_ERROR_MESSAGE,
        applies: is_auth_failure,
    },
];

fn is_rate_limited(status: Option<u16>, message: &str) -> bool {
    status == Some(429)
        || message.contains("rate limit")
        || (message.contains("quota") && !is_quota_exhausted(status, message))
}

fn is_quota_exhausted(_status: Option<u16>, message: &str) -> bool {
    QUOTA_EXHAUSTED_PHRASES
        .iter()
        .any(|phrase| message.contains(phrase))
}

fn is_auth_failure(status: Option<u16>, message: &str) -> bool {
    matches!(status, Some(401) | Some(403)) || message.contains("api key")
}

/// Map an upstream failure to the status, type and text the endpoint returns.
///
/// Anything no rule claims is a `server_error` that keeps the upstream status
/// (when it is an error status) and the raw message.
pub fn classify(status: Option<u16>, message: &str) -> Classification {
    let lowered = message.to_lowercase();

    if let Some(rule) = RULES.iter().find(|rule| (rule.applies)(status, &lowered)) {
        return Classification {
            status: rule.status,
            kind: rule.kind,
            message: rule.message.to_string(),
        };
    }

    let message = if message.trim().is_empty() {
        SERVER_ERROR_FALLBACK.to_string()
    } else {
        message.to_string()
    };

    Classification {
        status: status
            .filter(|s| (400..=599).contains(s))
            .unwrap_or(500),
        kind: ErrorKind::ServerError,
        message,
    }
}

pub fn classify_error(error: &DomainError) -> Classification {
    classify(error.upstream_status(), &error.raw_message())
}
