//! HTTP surface for the turn engine.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router with every route mounted.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::turns::router())
        .with_state(state)
}
