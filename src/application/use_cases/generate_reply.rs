use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::application::TextGenerator;
use crate::domain::{ChatPrompt, ChatReply, DomainError};

/// Turns one chat request into one model reply. Never retries.
pub struct GenerateReplyUseCase {
    generator: Arc<dyn TextGenerator>,
}

impl GenerateReplyUseCase {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Parse a raw request body and generate a reply for it. Invalid bodies
    /// fail before the generator is called.
    pub async fn execute_body(&self, body: &[u8]) -> Result<ChatReply, DomainError> {
        let prompt = ChatPrompt::from_body(body).inspect_err(|e| {
            warn!(error = %e, "Rejected chat request body");
        })?;
        self.execute(&prompt).await
    }

    pub async fn execute(&self, prompt: &ChatPrompt) -> Result<ChatReply, DomainError> {
        info!(
            "Generating reply with {} ({} turn(s))",
            self.generator.model_name(),
            prompt.turn_count()
        );
        let start_time = Instant::now();

        match self.generator.generate(prompt).await {
            Ok(text) => {
                debug!("Reply generated in {:?}", start_time.elapsed());
                Ok(ChatReply::new(text))
            }
            Err(e) => {
                error!(
                    error = %e,
                    status = ?e.upstream_status(),
                    "Chat API error"
                );
                Err(e)
            }
        }
    }
}
