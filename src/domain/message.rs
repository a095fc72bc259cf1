use super::{ConversationId, MessageId, MessageRole, Turn};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub user_id: Option<String>,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn to_turn(&self) -> Turn {
        Turn::new(self.role, self.content.clone())
    }
}

/// A message that has not been stored yet; id and timestamp come from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub conversation_id: ConversationId,
    pub user_id: Option<String>,
    pub role: MessageRole,
    pub content: String,
}

impl NewMessage {
    pub fn new(conversation_id: ConversationId, role: MessageRole, content: String) -> Self {
        Self {
            conversation_id,
            user_id: None,
            role,
            content,
        }
    }

    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }
}
