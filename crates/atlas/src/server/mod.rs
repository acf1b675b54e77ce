//! HTTP server for mind-map generation
//!
//! Exposes `POST /generate-mindmap` plus a health check. Uses axum for
//! routing and tower-http for tracing and CORS.

pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod startup;
pub mod types;

use herald::diagnostics::DiagnosticLog;
use std::sync::Arc;

use crate::generator::MindMapGenerator;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
  pub generator: Arc<MindMapGenerator>,
  pub logs: DiagnosticLog,
}

impl AppState {
  pub fn new(generator: MindMapGenerator, logs: DiagnosticLog) -> Self {
    Self { generator: Arc::new(generator), logs }
  }
}
