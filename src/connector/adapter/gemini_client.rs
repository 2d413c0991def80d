use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::TextGenerator;
use crate::domain::{ChatPrompt, DomainError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize, PartialEq, Eq)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Part<'a> {
    text: &'a str,
}

/// Subset of the `generateContent` response we read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: Option<u16>,
    #[serde(default)]
    message: String,
}

/// HTTP client for the Gemini `generateContent` API.
///
/// Configured from the environment by [`GeminiClient::from_env`]:
///
/// ```text
/// GEMINI_API_KEY=...
/// GEMINI_MODEL=gemini-2.5-flash
/// GEMINI_BASE_URL=https://generativelanguage.googleapis.com
/// ```
///
/// Non-success responses become [`DomainError::Upstream`] carrying the HTTP
/// status and the provider's error message. No timeout is set beyond the
/// HTTP stack's defaults.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + model path).
    url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let model: String = model.into();
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            base.trim_end_matches('/'),
            model
        );
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model,
            url,
        }
    }

    /// | Variable          | Default                                       |
    /// |-------------------|-----------------------------------------------|
    /// | `GEMINI_API_KEY`  | `""` (requests will fail with an auth error)  |
    /// | `GEMINI_MODEL`    | `gemini-2.5-flash`                            |
    /// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com`   |
    pub fn from_env() -> Self {
        let key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(key, model, base)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_request(prompt: &ChatPrompt) -> GenerateContentRequest<'_> {
        let contents = match prompt {
            ChatPrompt::Single(text) => vec![Content {
                role: "user",
                parts: vec![Part {
                    text: text.as_str(),
                }],
            }],
            ChatPrompt::Conversation(turns) => turns
                .iter()
                .map(|turn| Content {
                    role: turn.role.provider_role(),
                    parts: vec![Part {
                        text: turn.text.as_str(),
                    }],
                })
                .collect(),
        };
        GenerateContentRequest { contents }
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_text(response: GenerateContentResponse) -> Result<String, DomainError> {
        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(DomainError::upstream(
                None,
                format!("Response was blocked due to {reason}"),
            ));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::upstream(None, "No candidates returned by the model"))?;

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();

        if text.is_empty() {
            if let Some(reason) = candidate.finish_reason.filter(|r| r != "STOP") {
                return Err(DomainError::upstream(
                    None,
                    format!("Candidate was blocked due to {reason}"),
                ));
            }
        }

        Ok(text)
    }

    fn error_from_body(status: reqwest::StatusCode, body: &str) -> DomainError {
        let detail = serde_json::from_str::<ApiErrorEnvelope>(body)
            .map(|envelope| envelope.error)
            .ok();

        let code = detail
            .as_ref()
            .and_then(|d| d.code)
            .unwrap_or_else(|| status.as_u16());
        let message = detail
            .map(|d| d.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string());
        let reason = status.canonical_reason().unwrap_or("Error");

        DomainError::upstream(Some(code), format!("[{} {}] {}", status.as_u16(), reason, message))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &ChatPrompt) -> Result<String, DomainError> {
        let request = Self::build_request(prompt);

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::upstream(None, format!("Error fetching from Gemini: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(Self::error_from_body(status, &body));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            DomainError::upstream(None, format!("Failed to parse Gemini response: {e}"))
        })?;

        let text = Self::extract_text(api_response)?;
        debug!("GeminiClient: received {} chars", text.len());
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
