use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::LlmClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_chat_handler, delete_chat_handler, get_chat_handler, health_handler,
    list_chats_handler, rename_chat_handler, send_message_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<L>(state: AppState<L>) -> Router
where
    L: LlmClient + 'static,
{
    let cors = cors_layer(state.settings.server.cors_origin.as_deref());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let chat_routes = Router::new()
        .route("/chat", get(list_chats_handler::<L>))
        .route("/chat/new", post(create_chat_handler::<L>))
        .route(
            "/chat/{chat_id}",
            get(get_chat_handler::<L>)
                .post(send_message_handler::<L>)
                .put(rename_chat_handler::<L>)
                .delete(delete_chat_handler::<L>),
        );

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", chat_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

    match origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .allow_credentials(true),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any),
    }
}
