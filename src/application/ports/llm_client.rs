use async_trait::async_trait;

use crate::domain::Turn;

/// Generative-text provider. Receives the prior dialogue and the new user
/// prompt and returns the plain-text reply.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, history: &[Turn], prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
