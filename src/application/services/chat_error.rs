use crate::application::ports::{LlmClientError, RepositoryError};
use crate::domain::ConversationId;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("chat {0} not found")]
    NotFound(ConversationId),
    #[error("generation provider: {0}")]
    Upstream(#[from] LlmClientError),
    #[error("storage: {0}")]
    Storage(#[from] RepositoryError),
}
