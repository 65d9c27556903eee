use std::sync::Arc;

use perfume_notes_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        feedback::InMemoryFeedbackStore,
        providers::{backend::BackendProvider, RecommendationProvider},
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("perfume_notes_api=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;

    // Initialize application state
    let provider = BackendProvider::new(&config.backend_api_url, config.request_timeout())?;
    tracing::info!(
        provider = provider.name(),
        backend_api_url = %config.backend_api_url,
        "Recommendation provider ready"
    );

    let state = Arc::new(AppState::new(
        Arc::new(provider),
        Arc::new(InMemoryFeedbackStore::new()),
        config.default_similar_limit,
    ));

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
