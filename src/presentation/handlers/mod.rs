mod chat;
pub mod chat_types;
mod error;
mod extractors;
mod health;

pub use chat::{
    create_chat_handler, delete_chat_handler, get_chat_handler, list_chats_handler,
    rename_chat_handler, send_message_handler,
};
pub use error::{ApiError, ErrorResponse};
pub use extractors::{ChatIdPath, JsonBody};
pub use health::health_handler;
