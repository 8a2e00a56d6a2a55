//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use virtueverse_core::rng::DeterministicRng;
use virtueverse_state_store::file_store::JsonFileStateStore;
use virtueverse_test_support::{MockRng, SequenceRng};
use virtueverse_turn::domain::engine::TransitionPolicy;

use virtueverse_api::state::AppState;

/// Build the full app router over a real JSON state file at `path`, with a
/// wave RNG that always draws the lower bound.
pub fn build_test_app(path: &Path) -> Router {
    build_test_app_with_rng(path, Box::new(MockRng))
}

/// Build the full app router with a scripted wave RNG.
pub fn build_test_app_with_sequence(path: &Path, values: Vec<f64>) -> Router {
    build_test_app_with_rng(path, Box::new(SequenceRng::new(values)))
}

fn build_test_app_with_rng(path: &Path, rng: Box<dyn DeterministicRng + Send>) -> Router {
    let state_store = Arc::new(JsonFileStateStore::new(path));
    let app_state = AppState::new(state_store, rng, TransitionPolicy::default());
    virtueverse_api::app(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_raw(app, uri, serde_json::to_vec(body).unwrap()).await
}

/// Send a POST request with arbitrary bytes and return the response.
pub async fn post_raw(app: Router, uri: &str, body: Vec<u8>) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
