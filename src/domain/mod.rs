mod chat_title;
mod conversation;
mod conversation_id;
mod history_scope;
mod message;
mod message_id;
mod message_role;
mod turn;

pub use chat_title::{count_title_variants, disambiguate_title, is_title_variant};
pub use conversation::{Conversation, ConversationWithHistory};
pub use conversation_id::ConversationId;
pub use history_scope::{HistoryKey, HistoryScope};
pub use message::{Message, NewMessage};
pub use message_id::MessageId;
pub use message_role::MessageRole;
pub use turn::Turn;
