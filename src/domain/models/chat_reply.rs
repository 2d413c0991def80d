use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Classification of an endpoint failure as exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RateLimit,
    QuotaExceeded,
    AuthError,
    ServerError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::QuotaExceeded => "quota_exceeded",
            ErrorKind::AuthError => "auth_error",
            ErrorKind::ServerError => "server_error",
        }
    }

    /// Lenient parse used by the client; unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rate_limit" => Some(ErrorKind::RateLimit),
            "quota_exceeded" => Some(ErrorKind::QuotaExceeded),
            "auth_error" => Some(ErrorKind::AuthError),
            "server_error" => Some(ErrorKind::ServerError),
            _ => None,
        }
    }
}

/// Successful endpoint response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub timestamp: String,
}

impl ChatReply {
    /// Stamps the reply with the current time (RFC 3339, millisecond precision, UTC).
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Failed endpoint response body. `kind` is absent for invalid input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}
