use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::Turn;

/// Echoes the prompt back. Stands in for the provider in scaffold mode.
pub struct MockLlmClient {
    response_delay: Duration,
}

impl MockLlmClient {
    pub fn new(response_delay_ms: u64) -> Self {
        Self {
            response_delay: Duration::from_millis(response_delay_ms),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, history: &[Turn], prompt: &str) -> Result<String, LlmClientError> {
        if !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay).await;
        }
        tracing::debug!(history_turns = history.len(), "Scaffold echo reply");
        Ok(format!("Echo: {}", prompt))
    }
}
