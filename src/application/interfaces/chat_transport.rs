use async_trait::async_trait;

use crate::domain::{DomainError, ReplyOutcome};

/// Client-side link to the chat endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one user message using the single-message request form.
    ///
    /// Any HTTP response, success or error, is mapped to a [`ReplyOutcome`].
    /// `Err` means no usable response was received.
    async fn send_message(&self, message: &str) -> Result<ReplyOutcome, DomainError>;
}
