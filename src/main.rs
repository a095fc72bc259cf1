use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use chat_history::application::ports::{ConversationRepository, LlmClient};
use chat_history::application::services::{ChatService, ConversationService};
use chat_history::infrastructure::llm::{GeminiClient, MockLlmClient};
use chat_history::infrastructure::observability::{TracingConfig, init_tracing};
use chat_history::infrastructure::persistence::{
    InMemoryConversationRepository, PgConversationRepository, create_pool, run_migrations,
};
use chat_history::presentation::{AppState, Environment, ScaffoldConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;
    let scaffold_config = ScaffoldConfig::default();

    init_tracing(
        &TracingConfig {
            environment: environment.to_string(),
            level: settings.logging.level.clone(),
            json_format: settings.logging.enable_json,
        },
        settings.server.port,
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let router = if scaffold_config.enabled {
        tracing::warn!("Scaffold mode: in-memory storage and echo replies");
        let repository: Arc<dyn ConversationRepository> =
            Arc::new(InMemoryConversationRepository::new());
        let llm_client = Arc::new(MockLlmClient::new(scaffold_config.mock_response_delay_ms));
        build_router(llm_client, repository, settings)
    } else {
        let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
        if settings.database.run_migrations {
            run_migrations(&pool).await?;
        }
        let repository: Arc<dyn ConversationRepository> =
            Arc::new(PgConversationRepository::new(pool));

        if settings.llm.api_key.is_empty() {
            tracing::warn!("No Gemini API key configured, message requests will fail");
        }
        let llm_client = Arc::new(
            GeminiClient::new(settings.llm.api_key.clone(), settings.llm.chat_model.clone())
                .with_base_url(settings.llm.base_url.clone())
                .with_generation_config(settings.llm.temperature, settings.llm.max_output_tokens),
        );
        build_router(llm_client, repository, settings)
    };

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn build_router<L>(
    llm_client: Arc<L>,
    repository: Arc<dyn ConversationRepository>,
    settings: Settings,
) -> Router
where
    L: LlmClient + 'static,
{
    let conversation_service = Arc::new(ConversationService::new(
        Arc::clone(&repository),
        settings.chat.default_title.clone(),
    ));
    let chat_service = Arc::new(ChatService::new(
        llm_client,
        repository,
        settings.chat.history_scope,
        settings.chat.strict_persistence,
    ));

    create_router(AppState {
        conversation_service,
        chat_service,
        settings,
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
