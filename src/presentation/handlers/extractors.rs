use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::domain::ConversationId;

use super::error::ApiError;

/// `{chat_id}` path segment. A non-numeric id is answered as a JSON 400.
#[derive(Debug, Clone, Copy)]
pub struct ChatIdPath(pub ConversationId);

impl<S> FromRequestParts<S> for ChatIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(chat_id) = Path::<i64>::from_request_parts(parts, state).await?;
        Ok(Self(ConversationId::from(chat_id)))
    }
}

/// JSON body whose rejections (wrong content type, malformed or mistyped
/// fields) go through [`ApiError`] instead of axum's plain-text responses.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
