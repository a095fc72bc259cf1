use std::sync::Arc;

use tracing::instrument;

use crate::application::ports::{ConversationRepository, LlmClient};
use crate::domain::{ConversationId, HistoryKey, HistoryScope, MessageRole, NewMessage};
use crate::infrastructure::observability::sanitize_prompt;

use super::{ChatError, HistoryAssembler, MessageRecorder};

/// Sends a user message to the provider with the stored dialogue as context
/// and records both sides of the exchange.
pub struct ChatService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    repository: Arc<dyn ConversationRepository>,
    history: HistoryAssembler,
    recorder: MessageRecorder,
    history_scope: HistoryScope,
}

impl<L> ChatService<L>
where
    L: LlmClient,
{
    pub fn new(
        llm_client: Arc<L>,
        repository: Arc<dyn ConversationRepository>,
        history_scope: HistoryScope,
        strict_persistence: bool,
    ) -> Self {
        Self {
            llm_client,
            history: HistoryAssembler::new(Arc::clone(&repository), strict_persistence),
            recorder: MessageRecorder::new(Arc::clone(&repository), strict_persistence),
            repository,
            history_scope,
        }
    }

    #[instrument(skip(self, message, user_id))]
    pub async fn send_message(
        &self,
        conversation_id: ConversationId,
        message: &str,
        user_id: Option<&str>,
    ) -> Result<String, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::InvalidArgument(
                "message must not be empty".to_string(),
            ));
        }

        tracing::debug!(prompt = %sanitize_prompt(message), "Processing chat message");

        if self
            .repository
            .get_conversation(conversation_id)
            .await?
            .is_none()
        {
            return Err(ChatError::NotFound(conversation_id));
        }

        let user_id = user_id.map(str::trim).filter(|u| !u.is_empty());
        let key = match (self.history_scope, user_id) {
            (HistoryScope::Conversation, _) => HistoryKey::Conversation(conversation_id),
            (HistoryScope::User, Some(user_id)) => HistoryKey::User(user_id),
            (HistoryScope::User, None) => {
                return Err(ChatError::InvalidArgument(
                    "userId is required".to_string(),
                ));
            }
        };

        let history = self.history.assemble(key).await?;

        let reply = self
            .llm_client
            .generate(&history, message)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Generation failed"))?;

        let owner = user_id.map(str::to_string);
        self.recorder
            .record(
                NewMessage::new(conversation_id, MessageRole::User, message.to_string())
                    .with_user_id(owner.clone()),
            )
            .await?;
        self.recorder
            .record(
                NewMessage::new(conversation_id, MessageRole::Model, reply.clone())
                    .with_user_id(owner),
            )
            .await?;

        tracing::info!(reply_chars = reply.chars().count(), "Chat message answered");
        Ok(reply)
    }
}
