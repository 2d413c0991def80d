use async_trait::async_trait;
use tracing::debug;

use crate::application::TextGenerator;
use crate::domain::{ChatPrompt, DomainError, Role};

/// Offline [`TextGenerator`] that echoes the last user turn.
///
/// Can be told to fail every call with a fixed upstream error, which is how
/// the endpoint's error mapping is exercised without a provider.
pub struct MockTextGenerator {
    failure: Option<(Option<u16>, String)>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self { failure: None }
    }

    pub fn failing(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            failure: Some((status, message.into())),
        }
    }

    fn echo(prompt: &ChatPrompt) -> String {
        let last = match prompt {
            ChatPrompt::Single(text) => text.as_str(),
            ChatPrompt::Conversation(turns) => turns
                .iter()
                .rev()
                .find(|t| t.role == Role::User)
                .or(turns.last())
                .map(|t| t.text.as_str())
                .unwrap_or_default(),
        };
        format!("You said: {last}")
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &ChatPrompt) -> Result<String, DomainError> {
        if let Some((status, message)) = &self.failure {
            return Err(DomainError::upstream(*status, message.clone()));
        }

        let reply = Self::echo(prompt);
        debug!("MockTextGenerator replying with {} chars", reply.len());
        Ok(reply)
    }

    fn model_name(&self) -> &str {
        "mock-generator"
    }
}
