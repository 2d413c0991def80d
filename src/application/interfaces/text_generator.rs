use async_trait::async_trait;

use crate::domain::{ChatPrompt, DomainError};

/// Produces model text for a prompt or a role-tagged turn sequence.
///
/// Implementors own the provider details (API key, model selection, request
/// shaping). Provider failures are reported as [`DomainError::Upstream`] so the
/// endpoint can classify them without knowing which provider produced them.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &ChatPrompt) -> Result<String, DomainError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
