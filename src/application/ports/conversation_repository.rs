use crate::domain::{Conversation, ConversationId, Message, NewMessage};
use async_trait::async_trait;

use super::RepositoryError;

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn create_conversation(&self, title: &str) -> Result<Conversation, RepositoryError>;

    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError>;

    /// All conversations, most recent first.
    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError>;

    /// Titles that start with `base`, ignoring case. May return more than the
    /// exact matches; callers filter with [`crate::domain::is_title_variant`].
    async fn find_titles_like(&self, base: &str) -> Result<Vec<String>, RepositoryError>;

    async fn update_title(
        &self,
        id: ConversationId,
        title: &str,
    ) -> Result<Option<Conversation>, RepositoryError>;

    /// Returns false when no conversation had this id.
    async fn delete_conversation(&self, id: ConversationId) -> Result<bool, RepositoryError>;

    async fn append_message(&self, message: &NewMessage) -> Result<Message, RepositoryError>;

    /// Messages of one conversation, oldest first.
    async fn get_messages(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Vec<Message>, RepositoryError>;

    /// Messages recorded for one user across all conversations, oldest first.
    async fn get_messages_for_user(&self, user_id: &str) -> Result<Vec<Message>, RepositoryError>;

    /// Returns the number of deleted messages.
    async fn delete_messages(&self, conversation_id: ConversationId)
    -> Result<u64, RepositoryError>;
}
