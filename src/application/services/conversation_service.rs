use std::sync::Arc;

use tracing::instrument;

use crate::application::ports::ConversationRepository;
use crate::domain::{
    Conversation, ConversationId, ConversationWithHistory, count_title_variants,
    disambiguate_title,
};

use super::ChatError;

pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

/// Lifecycle of conversations: create, list, fetch, rename, delete.
pub struct ConversationService {
    repository: Arc<dyn ConversationRepository>,
    default_title: String,
}

impl ConversationService {
    pub fn new(repository: Arc<dyn ConversationRepository>, default_title: String) -> Self {
        Self {
            repository,
            default_title,
        }
    }

    /// Creates a conversation, suffixing the title with `" (N+1)"` when `N`
    /// stored titles already match it.
    ///
    /// The lookup and the insert are separate statements, so two concurrent
    /// creates with the same title can end up with the same suffix.
    #[instrument(skip(self))]
    pub async fn create(&self, title: Option<&str>) -> Result<Conversation, ChatError> {
        let base = title
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(self.default_title.as_str());

        let existing = self.repository.find_titles_like(base).await?;
        let matches = count_title_variants(base, existing.iter().map(String::as_str));
        let title = disambiguate_title(base, matches);

        let conversation = self.repository.create_conversation(&title).await?;
        tracing::info!(
            conversation_id = %conversation.id,
            title = %conversation.title,
            "Conversation created"
        );
        Ok(conversation)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Conversation>, ChatError> {
        Ok(self.repository.list_conversations().await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: ConversationId) -> Result<ConversationWithHistory, ChatError> {
        let conversation = self
            .repository
            .get_conversation(id)
            .await?
            .ok_or(ChatError::NotFound(id))?;

        let history = self.repository.get_messages(id).await?;

        Ok(ConversationWithHistory {
            conversation,
            history,
        })
    }

    #[instrument(skip(self))]
    pub async fn rename(&self, id: ConversationId, title: &str) -> Result<Conversation, ChatError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ChatError::InvalidArgument(
                "title must not be empty".to_string(),
            ));
        }

        self.repository
            .update_title(id, title)
            .await?
            .ok_or(ChatError::NotFound(id))
    }

    /// Deletes the conversation's messages, then the conversation itself.
    /// A failure between the two steps is not compensated.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ConversationId) -> Result<(), ChatError> {
        if self.repository.get_conversation(id).await?.is_none() {
            return Err(ChatError::NotFound(id));
        }

        let removed_messages = self.repository.delete_messages(id).await?;

        if !self.repository.delete_conversation(id).await? {
            return Err(ChatError::NotFound(id));
        }

        tracing::info!(
            conversation_id = %id,
            removed_messages,
            "Conversation deleted"
        );
        Ok(())
    }
}
