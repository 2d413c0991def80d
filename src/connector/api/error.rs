//! Error response for the chat route.
//!
//! Every failure leaves the handler as a [`ChatFailure`], which renders the
//! stable `{ "error", "type" }` JSON shape. Provider errors are classified
//! first, so raw provider payloads only reach the client as the message of a
//! `server_error`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::classify_error;
use crate::domain::{DomainError, ErrorBody};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatFailure {
    status: StatusCode,
    body: ErrorBody,
}

impl ChatFailure {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl From<DomainError> for ChatFailure {
    fn from(e: DomainError) -> Self {
        if let DomainError::InvalidInput(message) = e {
            return Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorBody {
                    error: message,
                    kind: None,
                },
            };
        }

        let classification = classify_error(&e);
        Self {
            status: StatusCode::from_u16(classification.status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: ErrorBody {
                error: classification.message,
                kind: Some(classification.kind),
            },
        }
    }
}

impl IntoResponse for ChatFailure {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
