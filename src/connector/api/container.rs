use std::sync::Arc;

use tracing::debug;

use crate::application::{GenerateReplyUseCase, TextGenerator};
use crate::connector::adapter::{GeminiClient, MockTextGenerator};

pub struct ContainerConfig {
    /// Answer with the offline echo generator instead of calling Gemini.
    pub mock_generator: bool,
}

/// Shared, immutable wiring for the HTTP endpoint.
pub struct Container {
    generator: Arc<dyn TextGenerator>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let generator: Arc<dyn TextGenerator> = if config.mock_generator {
            debug!("Using mock text generator");
            Arc::new(MockTextGenerator::new())
        } else {
            let client = GeminiClient::from_env();
            debug!("Using Gemini at {}", client.url());
            Arc::new(client)
        };

        Self { generator }
    }

    /// Build a container around an existing generator (tests, embedding).
    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> Arc<dyn TextGenerator> {
        Arc::clone(&self.generator)
    }

    pub fn generate_reply_use_case(&self) -> GenerateReplyUseCase {
        GenerateReplyUseCase::new(self.generator())
    }
}
