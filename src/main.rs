use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pindorama::api::{create_router, AppState};
use pindorama::config::Config;
use pindorama::models::builtin_brands;
use pindorama::services::{providers::GeminiProvider, Catalogue, RecommendationAdapter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pindorama=info,tower_http=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalogue = match &config.catalogue_path {
        Some(path) => Catalogue::from_json_file(path)?,
        None => Catalogue::builtin(),
    };
    tracing::info!(titles = catalogue.len(), "Catalogue loaded");

    let provider = GeminiProvider::from_config(&config);
    if !provider.has_credential() {
        tracing::warn!("API_KEY not set; AI search will return no results");
    }

    // Initialize application state
    let state = AppState::new(
        Arc::new(catalogue),
        builtin_brands(),
        RecommendationAdapter::new(Arc::new(provider)),
        Duration::from_secs(config.featured_rotation_secs),
    );
    state.sync_featured_rotation().await;

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server running on http://{}", address);
    axum::serve(listener, app).await?;

    Ok(())
}
