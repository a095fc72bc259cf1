use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::ChatError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// HTTP face of [`ChatError`]. Server-side failures are logged here and
/// answered with a generic message.
#[derive(Debug)]
pub struct ApiError(ChatError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(ChatError::InvalidArgument(message.into()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(format!("invalid chat id: {}", rejection.body_text()))
    }
}

impl From<ChatError> for ApiError {
    fn from(error: ChatError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ChatError::InvalidArgument(message) => {
                tracing::warn!(error = %self.0, "Rejected request");
                (StatusCode::BAD_REQUEST, message.clone())
            }
            ChatError::NotFound(_) => (StatusCode::NOT_FOUND, "Chat not found.".to_string()),
            ChatError::Upstream(e) => {
                tracing::error!(error = %e, "Generation provider failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error while processing the message.".to_string(),
                )
            }
            ChatError::Storage(e) => {
                tracing::error!(error = %e, "Storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal storage error.".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
