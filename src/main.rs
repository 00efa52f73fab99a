use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use game_finder::{
    api::{create_router, AppState},
    config::Config,
    db::create_storage,
    services::{Controller, GameCatalog, RawgCatalog},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("game_finder=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog: Arc<dyn GameCatalog> = Arc::new(RawgCatalog::new(
        config.api_key.clone(),
        config.api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?);
    let storage = create_storage(&config)?;

    tracing::info!(provider = catalog.name(), api_url = %config.api_url, "Catalog configured");

    // Restore persisted favorites and recent searches
    let controller = Controller::restore(catalog, storage).await;
    let state = AppState::new(controller, &config.site_url);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
