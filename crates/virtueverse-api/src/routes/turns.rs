//! Routes for the turn processing context.

use axum::body::Bytes;
use axum::extract::State;
use axum::{
    Json, Router,
    routing::{get, post},
};
use tracing::{info, instrument};
use uuid::Uuid;

use virtueverse_turn::application::command_handlers;
use virtueverse_turn::application::query_handlers::{self, SessionStateView};
use virtueverse_turn::domain::commands;
use virtueverse_turn::domain::turn::EngineTurn;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /turns
///
/// The body is decoded by the turn codec rather than an axum extractor so
/// that malformed turns get the same error body as every other failure.
#[instrument(skip(state, body), fields(bytes = body.len()))]
async fn process_turn(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EngineTurn>, ApiError> {
    let command = commands::ProcessTurn {
        correlation_id: Uuid::new_v4(),
        payload: body.to_vec(),
    };

    info!(correlation_id = %command.correlation_id, "handling process_turn command");

    let turn = command_handlers::handle_process_turn(
        &command,
        &state.policy,
        &state.turn_lock,
        &*state.state_store,
    )
    .await?;

    Ok(Json(turn))
}

/// GET /state
#[instrument(skip(state))]
async fn current_state(
    State(state): State<AppState>,
) -> Result<Json<SessionStateView>, ApiError> {
    let view = query_handlers::get_current_state(&state.turn_lock, &*state.state_store).await?;
    Ok(Json(view))
}

/// Returns the router for the turn context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/turns", post(process_turn))
        .route("/state", get(current_state))
}
