//! VirtueVerse turn engine API server entry point.

use std::error::Error;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use virtueverse_api::config::ApiConfig;
use virtueverse_api::state::AppState;
use virtueverse_core::rng::{DeterministicRng, SeededRng, SystemRng};
use virtueverse_state_store::file_store::JsonFileStateStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting VirtueVerse turn engine");

    let config = ApiConfig::from_env()?;

    let rng: Box<dyn DeterministicRng + Send> = match config.rng_seed {
        Some(seed) => {
            tracing::info!(seed, "using seeded wave RNG");
            Box::new(SeededRng::new(seed))
        }
        None => Box::new(SystemRng::new()),
    };

    let state_store = Arc::new(JsonFileStateStore::new(config.state_path.clone()));
    tracing::info!(path = %config.state_path.display(), "session state file");

    let app_state = AppState::new(state_store, rng, config.policy);

    // TODO: Replace CorsLayer::permissive() with restricted origins once the front end has a fixed host.
    let app = virtueverse_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
