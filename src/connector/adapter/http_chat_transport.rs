use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ChatTransport;
use crate::domain::{DomainError, ErrorKind, ReplyOutcome};

/// Where `chatgate serve` listens by default.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/chat";

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    message: &'a str,
}

/// Union of the success and error bodies the endpoint can return.
#[derive(Debug, Default, Deserialize)]
struct EndpointBody {
    reply: Option<String>,
    error: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// [`ChatTransport`] that POSTs `{ "message": ... }` to the chat endpoint.
pub struct HttpChatTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChatTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn outcome(status: reqwest::StatusCode, body: EndpointBody) -> ReplyOutcome {
        if status.is_success() {
            if let Some(reply) = body.reply {
                return ReplyOutcome::Reply(reply);
            }
        }

        ReplyOutcome::Failed {
            kind: body.kind.as_deref().and_then(ErrorKind::parse),
            error: body.error,
        }
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send_message(&self, message: &str) -> Result<ReplyOutcome, DomainError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SendMessageRequest { message })
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("request to {} failed: {e}", self.endpoint)))?;

        let status = response.status();
        let body: EndpointBody = response
            .json()
            .await
            .map_err(|e| DomainError::transport(format!("unreadable response ({status}): {e}")))?;

        debug!("Endpoint answered {status}");
        Ok(Self::outcome(status, body))
    }
}
