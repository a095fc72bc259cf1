use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use crate::application::ports::LlmClient;
use crate::presentation::state::AppState;

use super::chat_types::{
    ChatWithHistoryResponse, ConversationResponse, CreateChatRequest, DeleteChatResponse,
    RenameChatRequest, SendMessageRequest, SendMessageResponse,
};
use super::error::ApiError;
use super::extractors::{ChatIdPath, JsonBody};

/// `POST /chat/new`. The body is optional; without a title the configured
/// default is used.
#[tracing::instrument(skip(state, body))]
pub async fn create_chat_handler<L>(
    State(state): State<AppState<L>>,
    body: Bytes,
) -> Result<Json<ConversationResponse>, ApiError>
where
    L: LlmClient + 'static,
{
    let request: CreateChatRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateChatRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("invalid request body: {}", e)))?
    };

    let conversation = state
        .conversation_service
        .create(request.title.as_deref())
        .await?;

    Ok(Json(conversation.into()))
}

#[tracing::instrument(skip(state))]
pub async fn list_chats_handler<L>(
    State(state): State<AppState<L>>,
) -> Result<Json<Vec<ConversationResponse>>, ApiError>
where
    L: LlmClient + 'static,
{
    let conversations = state.conversation_service.list().await?;
    Ok(Json(conversations.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(skip(state))]
pub async fn get_chat_handler<L>(
    State(state): State<AppState<L>>,
    ChatIdPath(chat_id): ChatIdPath,
) -> Result<Json<ChatWithHistoryResponse>, ApiError>
where
    L: LlmClient + 'static,
{
    let chat = state
        .conversation_service
        .get(chat_id)
        .await?;

    Ok(Json(chat.into()))
}

#[tracing::instrument(skip(state, request))]
pub async fn send_message_handler<L>(
    State(state): State<AppState<L>>,
    ChatIdPath(chat_id): ChatIdPath,
    JsonBody(request): JsonBody<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError>
where
    L: LlmClient + 'static,
{
    let message = request
        .message
        .ok_or_else(|| ApiError::bad_request("message is required"))?;

    let response = state
        .chat_service
        .send_message(
            chat_id,
            &message,
            request.user_id.as_deref(),
        )
        .await?;

    Ok(Json(SendMessageResponse { response }))
}

#[tracing::instrument(skip(state, request))]
pub async fn rename_chat_handler<L>(
    State(state): State<AppState<L>>,
    ChatIdPath(chat_id): ChatIdPath,
    JsonBody(request): JsonBody<RenameChatRequest>,
) -> Result<Json<ConversationResponse>, ApiError>
where
    L: LlmClient + 'static,
{
    let title = request
        .title
        .ok_or_else(|| ApiError::bad_request("title is required"))?;

    let conversation = state
        .conversation_service
        .rename(chat_id, &title)
        .await?;

    Ok(Json(conversation.into()))
}

#[tracing::instrument(skip(state))]
pub async fn delete_chat_handler<L>(
    State(state): State<AppState<L>>,
    ChatIdPath(chat_id): ChatIdPath,
) -> Result<Json<DeleteChatResponse>, ApiError>
where
    L: LlmClient + 'static,
{
    state
        .conversation_service
        .delete(chat_id)
        .await?;

    Ok(Json(DeleteChatResponse {
        message: "Chat deleted successfully.".to_string(),
    }))
}
