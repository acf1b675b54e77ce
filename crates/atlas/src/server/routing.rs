//! Axum router configuration

use axum::{
  middleware,
  routing::{get, post},
  Router,
};

use crate::server::handlers::{mindmap, status};
use crate::server::middleware::request_context_middleware;
use crate::server::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
  Router::new()
    .route("/status", get(status::status))
    .route(
      "/generate-mindmap",
      post(mindmap::generate_mindmap).fallback(mindmap::method_not_allowed),
    )
    .layer(middleware::from_fn_with_state(state.clone(), request_context_middleware))
    .with_state(state)
}
