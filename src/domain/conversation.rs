use super::{ConversationId, Message};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A conversation together with its messages in ascending creation order.
#[derive(Debug, Clone)]
pub struct ConversationWithHistory {
    pub conversation: Conversation,
    pub history: Vec<Message>,
}
