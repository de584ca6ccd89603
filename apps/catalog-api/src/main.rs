//! Catalog API - product catalog REST server

use axum_helpers::server::create_production_app;
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        environment = config.environment.as_str(),
        storage = config.storage.name(),
        "Starting {} v{}",
        config.app.name,
        config.app.version
    );

    let state = AppState::connect(config).await?;
    let app = api::app(&state)?;
    let server = state.config.server.clone();

    info!("API: http://{}/api", server.address());

    create_production_app(app, &server, Duration::from_secs(30), async move {
        info!("Shutting down: releasing storage");
        state.close().await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
