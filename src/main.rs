use std::sync::Arc;

use cinema_recs::{
    api::{create_router, AppState},
    config::Config,
    services::RecommendationEngine,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinema_recs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Refuse to serve anything without a complete snapshot
    let paths = config.artifact_paths();
    let engine = tokio::task::spawn_blocking(move || RecommendationEngine::load(&paths))
        .await?
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load recommendation artifacts");
            e
        })?;

    let state = AppState::new(Arc::new(engine)).with_config(&config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
