use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::application::services::{ChatService, ConversationService};
use crate::presentation::config::Settings;

pub struct AppState<L>
where
    L: LlmClient,
{
    pub conversation_service: Arc<ConversationService>,
    pub chat_service: Arc<ChatService<L>>,
    pub settings: Settings,
}

impl<L> Clone for AppState<L>
where
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            conversation_service: Arc::clone(&self.conversation_service),
            chat_service: Arc::clone(&self.chat_service),
            settings: self.settings.clone(),
        }
    }
}
