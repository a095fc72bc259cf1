use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Conversation, ConversationWithHistory, Message, MessageRole};

#[derive(Debug, Default, Deserialize)]
pub struct CreateChatRequest {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameChatRequest {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub message: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id.as_i64(),
            title: conversation.title,
            created_at: conversation.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryEntryResponse {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for HistoryEntryResponse {
    fn from(message: Message) -> Self {
        Self {
            role: message.role,
            content: message.content,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatWithHistoryResponse {
    pub chat: ConversationResponse,
    pub history: Vec<HistoryEntryResponse>,
}

impl From<ConversationWithHistory> for ChatWithHistoryResponse {
    fn from(value: ConversationWithHistory) -> Self {
        Self {
            chat: value.conversation.into(),
            history: value.history.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteChatResponse {
    pub message: String,
}
