//! Health check endpoint

use axum::{extract::State, response::Json};

use crate::server::{types::StatusResponse, AppState};

/// GET /status - Health check
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
  Json(StatusResponse {
    status: "healthy".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    persisting: state.generator.config().persists(),
  })
}
