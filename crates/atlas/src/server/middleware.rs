//! Per-request context and request logging
//!
//! Every request gets a [`RequestContext`] carrying an id and request
//! metadata; handlers pull it out of the extensions to log against it.

use axum::{
  extract::{Request, State},
  http::{Method, Uri},
  middleware::Next,
  response::Response,
};
use herald::diagnostics::{DiagnosticLog, Level, LogContext};
use std::time::Instant;
use uuid::Uuid;

use crate::server::AppState;

/// Request context containing the diagnostic log and request metadata
#[derive(Clone)]
pub struct RequestContext {
  pub request_id: Uuid,
  pub method: Method,
  pub uri: Uri,
  pub user_agent: Option<String>,
  pub logs: DiagnosticLog,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri, user_agent: Option<String>, logs: DiagnosticLog) -> Self {
    Self { request_id: Uuid::new_v4(), method, uri, user_agent, logs }
  }

  fn log_context(&self, status_code: Option<u16>, duration_ms: Option<f64>) -> LogContext {
    LogContext {
      request_id: Some(self.request_id.to_string()),
      method: Some(self.method.to_string()),
      path: Some(self.uri.path().to_string()),
      user_agent: self.user_agent.clone(),
      status_code,
      duration_ms,
    }
  }

  async fn log(&self, level: Level, message: &str, component: &str) {
    let message = format!("[{}] {} {} - {}", self.request_id, self.method, self.uri.path(), message);
    self.logs.record_with_context(level, &message, component, self.log_context(None, None)).await;
  }

  pub async fn log_info(&self, message: &str, component: &str) {
    self.log(Level::Info, message, component).await;
  }

  pub async fn log_success(&self, message: &str, component: &str) {
    self.log(Level::Success, message, component).await;
  }

  pub async fn log_warn(&self, message: &str, component: &str) {
    self.log(Level::Warn, message, component).await;
  }

  pub async fn log_error(&self, message: &str, component: &str) {
    self.log(Level::Error, message, component).await;
  }

  async fn log_request_complete(&self, status_code: u16, duration_ms: f64) {
    let message = format!(
      "[{}] {} {} - Request completed (Status: {}, Duration: {:.2}ms)",
      self.request_id,
      self.method,
      self.uri.path(),
      status_code,
      duration_ms
    );
    let context = self.log_context(Some(status_code), Some(duration_ms));
    self.logs.record_with_context(Level::Info, &message, "http-request", context).await;
  }
}

/// Inject a [`RequestContext`] and log request start and completion
pub async fn request_context_middleware(
  State(state): State<AppState>,
  mut request: Request,
  next: Next,
) -> Response {
  let user_agent = request
    .headers()
    .get(axum::http::header::USER_AGENT)
    .and_then(|value| value.to_str().ok())
    .map(str::to_string);

  let context =
    RequestContext::new(request.method().clone(), request.uri().clone(), user_agent, state.logs.clone());

  let start = Instant::now();
  context.log_info("Request started", "http-request").await;

  request.extensions_mut().insert(context.clone());
  let response = next.run(request).await;

  let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
  context.log_request_complete(response.status().as_u16(), duration_ms).await;

  response
}
