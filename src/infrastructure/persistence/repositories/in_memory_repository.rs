use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::ports::{ConversationRepository, RepositoryError};
use crate::domain::{Conversation, ConversationId, Message, MessageId, NewMessage};

/// Process-local store with the same ordering rules as the PostgreSQL one.
/// Backs scaffold mode and tests.
#[derive(Default)]
pub struct InMemoryConversationRepository {
    state: RwLock<InMemoryState>,
}

#[derive(Default)]
struct InMemoryState {
    last_conversation_id: i64,
    last_message_id: i64,
    last_timestamp: Option<DateTime<Utc>>,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
}

impl InMemoryState {
    // Wall clocks can step backwards; stored timestamps must not.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let timestamp = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        timestamp
    }
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn create_conversation(&self, title: &str) -> Result<Conversation, RepositoryError> {
        let mut state = self.state.write().await;
        state.last_conversation_id += 1;
        let conversation = Conversation {
            id: ConversationId::from_i64(state.last_conversation_id),
            title: title.to_string(),
            created_at: state.next_timestamp(),
        };
        state.conversations.push(conversation.clone());
        Ok(conversation)
    }

    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.conversations.iter().find(|c| c.id == id).cloned())
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError> {
        let state = self.state.read().await;
        let mut conversations = state.conversations.clone();
        conversations.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(conversations)
    }

    async fn find_titles_like(&self, base: &str) -> Result<Vec<String>, RepositoryError> {
        let prefix = base.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .conversations
            .iter()
            .filter(|c| c.title.to_lowercase().starts_with(&prefix))
            .map(|c| c.title.clone())
            .collect())
    }

    async fn update_title(
        &self,
        id: ConversationId,
        title: &str,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let mut state = self.state.write().await;
        Ok(state
            .conversations
            .iter_mut()
            .find(|c| c.id == id)
            .map(|c| {
                c.title = title.to_string();
                c.clone()
            }))
    }

    async fn delete_conversation(&self, id: ConversationId) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        let before = state.conversations.len();
        state.conversations.retain(|c| c.id != id);
        Ok(state.conversations.len() < before)
    }

    async fn append_message(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let mut state = self.state.write().await;
        state.last_message_id += 1;
        let stored = Message {
            id: MessageId::from_i64(state.last_message_id),
            conversation_id: message.conversation_id,
            user_id: message.user_id.clone(),
            role: message.role,
            content: message.content.clone(),
            created_at: state.next_timestamp(),
        };
        state.messages.push(stored.clone());
        Ok(stored)
    }

    async fn get_messages(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect())
    }

    async fn get_messages_for_user(&self, user_id: &str) -> Result<Vec<Message>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn delete_messages(
        &self,
        conversation_id: ConversationId,
    ) -> Result<u64, RepositoryError> {
        let mut state = self.state.write().await;
        let before = state.messages.len();
        state.messages.retain(|m| m.conversation_id != conversation_id);
        Ok((before - state.messages.len()) as u64)
    }
}
