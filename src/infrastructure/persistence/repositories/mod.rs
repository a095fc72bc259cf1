mod in_memory_repository;
mod pg_conversation_repository;

pub use in_memory_repository::InMemoryConversationRepository;
pub use pg_conversation_repository::PgConversationRepository;
