use serde::Deserialize;

use super::ConversationId;

/// Which records make up the context sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryScope {
    /// Messages of the conversation being replied to.
    #[default]
    Conversation,
    /// Every message the calling user has sent or received, across conversations.
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKey<'a> {
    Conversation(ConversationId),
    User(&'a str),
}
