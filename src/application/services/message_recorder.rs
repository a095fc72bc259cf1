use std::sync::Arc;

use tracing::instrument;

use crate::application::ports::ConversationRepository;
use crate::domain::NewMessage;

use super::ChatError;

/// Appends single turns to the store. Writes are best effort unless
/// `strict_persistence` is set: a failed insert is logged and dropped.
pub struct MessageRecorder {
    repository: Arc<dyn ConversationRepository>,
    strict_persistence: bool,
}

impl MessageRecorder {
    pub fn new(repository: Arc<dyn ConversationRepository>, strict_persistence: bool) -> Self {
        Self {
            repository,
            strict_persistence,
        }
    }

    #[instrument(
        skip(self, message),
        fields(conversation_id = %message.conversation_id, role = %message.role)
    )]
    pub async fn record(&self, message: NewMessage) -> Result<(), ChatError> {
        match self.repository.append_message(&message).await {
            Ok(stored) => {
                tracing::debug!(message_id = %stored.id, "Message recorded");
                Ok(())
            }
            Err(e) if self.strict_persistence => {
                tracing::error!(error = %e, "Failed to record message");
                Err(ChatError::Storage(e))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to record message, dropping it");
                Ok(())
            }
        }
    }
}
