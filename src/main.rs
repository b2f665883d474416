use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use chat_api_server::catalog::CatalogStore;
use chat_api_server::config::Settings;
use chat_api_server::handlers::status::StatusState;
use chat_api_server::prompt::PromptBuilder;
use chat_api_server::services::{ChatService, GeminiClient};
use chat_api_server::session::SessionStore;

const EVICTION_SWEEP_INTERVAL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,chat_api_server=debug".to_string()),
        )
        .with_target(true)
        .init();

    info!("Starting chat API server...");

    let settings = Settings::load()?;
    info!("Configuration loaded");

    if !settings.llm.api_key_configured() {
        warn!("No API key configured; generation calls will fail until APP__LLM__API_KEY is set");
    }

    // Catalog problems never abort startup; retrieval just finds nothing.
    let catalog = Arc::new(CatalogStore::load_or_empty(&settings.catalog.path));
    info!("Catalog ready: {} entries", catalog.len());

    let sessions = SessionStore::new(Duration::from_secs(settings.chat.session_ttl_seconds));
    sessions.start_eviction_task(EVICTION_SWEEP_INTERVAL);

    let backend = Arc::new(GeminiClient::new(settings.llm.clone())?);

    let prompt = match &settings.chat.system_instruction {
        Some(instruction) => PromptBuilder::new(instruction.clone()),
        None => PromptBuilder::default(),
    };

    let chat_service = Arc::new(ChatService::new(
        catalog,
        sessions,
        backend,
        prompt,
        settings.chat.max_history_tokens,
    ));

    let status = Arc::new(StatusState {
        api_key_configured: settings.llm.api_key_configured(),
    });

    let app = chat_api_server::build_router(chat_service, status);

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
