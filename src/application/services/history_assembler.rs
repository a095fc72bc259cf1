use std::sync::Arc;

use tracing::instrument;

use crate::application::ports::ConversationRepository;
use crate::domain::{HistoryKey, Message, Turn};

use super::ChatError;

/// Rebuilds the provider-facing dialogue from stored messages.
///
/// Reads are best effort: unless `strict_persistence` is set, a storage
/// failure yields an empty history so the new message can still be answered.
pub struct HistoryAssembler {
    repository: Arc<dyn ConversationRepository>,
    strict_persistence: bool,
}

impl HistoryAssembler {
    pub fn new(repository: Arc<dyn ConversationRepository>, strict_persistence: bool) -> Self {
        Self {
            repository,
            strict_persistence,
        }
    }

    #[instrument(skip(self))]
    pub async fn assemble(&self, key: HistoryKey<'_>) -> Result<Vec<Turn>, ChatError> {
        let messages = match key {
            HistoryKey::Conversation(id) => self.repository.get_messages(id).await,
            HistoryKey::User(user_id) => self.repository.get_messages_for_user(user_id).await,
        };

        match messages {
            Ok(messages) => {
                tracing::debug!(turns = messages.len(), "History assembled");
                Ok(messages.iter().map(Message::to_turn).collect())
            }
            Err(e) if self.strict_persistence => {
                tracing::error!(error = %e, "Failed to read history");
                Err(ChatError::Storage(e))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read history, continuing without context");
                Ok(Vec::new())
            }
        }
    }
}
