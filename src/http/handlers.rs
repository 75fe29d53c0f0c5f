use super::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

/// GET /session
/// Current (or last) session id and state
pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.tracker.snapshot().await;
    (StatusCode::OK, Json(snapshot))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
