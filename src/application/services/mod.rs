mod chat_error;
mod chat_service;
mod conversation_service;
mod history_assembler;
mod message_recorder;

pub use chat_error::ChatError;
pub use chat_service::ChatService;
pub use conversation_service::{ConversationService, DEFAULT_CHAT_TITLE};
pub use history_assembler::HistoryAssembler;
pub use message_recorder::MessageRecorder;
