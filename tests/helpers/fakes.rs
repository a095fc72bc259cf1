use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chat_history::application::ports::{
    ConversationRepository, LlmClient, LlmClientError, RepositoryError,
};
use chat_history::domain::{Conversation, ConversationId, Message, NewMessage, Turn};
use chat_history::infrastructure::persistence::InMemoryConversationRepository;

/// Replies with a fixed text and remembers every call.
pub struct RecordingLlmClient {
    reply: String,
    calls: Mutex<Vec<(Vec<Turn>, String)>>,
}

impl RecordingLlmClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Vec<Turn>, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for RecordingLlmClient {
    async fn generate(&self, history: &[Turn], prompt: &str) -> Result<String, LlmClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((history.to_vec(), prompt.to_string()));
        Ok(self.reply.clone())
    }
}

pub struct FailingLlmClient;

#[async_trait::async_trait]
impl LlmClient for FailingLlmClient {
    async fn generate(&self, _history: &[Turn], _prompt: &str) -> Result<String, LlmClientError> {
        Err(LlmClientError::RateLimited("quota exceeded".to_string()))
    }
}

/// In-memory repository whose history reads and message writes can be made
/// to fail on demand.
#[derive(Default)]
pub struct FlakyRepository {
    inner: InMemoryConversationRepository,
    fail_history_reads: AtomicBool,
    fail_message_writes: AtomicBool,
}

impl FlakyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_history_reads(&self, fail: bool) {
        self.fail_history_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_message_writes(&self, fail: bool) {
        self.fail_message_writes.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), RepositoryError> {
        if flag.load(Ordering::SeqCst) {
            Err(RepositoryError::ConnectionFailed("database unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl ConversationRepository for FlakyRepository {
    async fn create_conversation(&self, title: &str) -> Result<Conversation, RepositoryError> {
        self.inner.create_conversation(title).await
    }

    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        self.inner.get_conversation(id).await
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError> {
        self.inner.list_conversations().await
    }

    async fn find_titles_like(&self, base: &str) -> Result<Vec<String>, RepositoryError> {
        self.inner.find_titles_like(base).await
    }

    async fn update_title(
        &self,
        id: ConversationId,
        title: &str,
    ) -> Result<Option<Conversation>, RepositoryError> {
        self.inner.update_title(id, title).await
    }

    async fn delete_conversation(&self, id: ConversationId) -> Result<bool, RepositoryError> {
        self.inner.delete_conversation(id).await
    }

    async fn append_message(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        Self::check(&self.fail_message_writes)?;
        self.inner.append_message(message).await
    }

    async fn get_messages(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Vec<Message>, RepositoryError> {
        Self::check(&self.fail_history_reads)?;
        self.inner.get_messages(conversation_id).await
    }

    async fn get_messages_for_user(&self, user_id: &str) -> Result<Vec<Message>, RepositoryError> {
        Self::check(&self.fail_history_reads)?;
        self.inner.get_messages_for_user(user_id).await
    }

    async fn delete_messages(
        &self,
        conversation_id: ConversationId,
    ) -> Result<u64, RepositoryError> {
        self.inner.delete_messages(conversation_id).await
    }
}
