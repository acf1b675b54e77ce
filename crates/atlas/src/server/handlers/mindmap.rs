//! Mind-map generation endpoint

use axum::{
  body::Bytes,
  extract::{Extension, State},
  http::StatusCode,
  response::Json,
};

use crate::generator::{GenerateError, GenerationResult};
use crate::server::{
  middleware::RequestContext,
  types::{ErrorResponse, GenerateRequest},
  AppState,
};

type ApiFailure = (StatusCode, Json<ErrorResponse>);

fn failure(status: StatusCode, message: &str) -> ApiFailure {
  (status, Json(ErrorResponse::new(message)))
}

/// POST /generate-mindmap - Generate a mind map for a topic
pub async fn generate_mindmap(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  body: Bytes,
) -> Result<Json<GenerationResult>, ApiFailure> {
  let Some(request) = GenerateRequest::parse(&body) else {
    context.log_warn("Rejected unparseable request body", "mindmap-api").await;
    return Err(failure(StatusCode::BAD_REQUEST, "Invalid request body"));
  };

  match state.generator.generate(request.topic.as_deref()).await {
    Ok(result) => {
      let message = match &result.filename {
        Some(filename) => format!("Generated mind map and wrote {filename}"),
        None => "Generated mind map".to_string(),
      };
      context.log_success(&message, "mindmap-api").await;
      Ok(Json(result))
    }
    Err(e) => {
      match &e {
        GenerateError::InvalidInput => context.log_warn(&e.to_string(), "mindmap-api").await,
        _ => context.log_error(&e.to_string(), "mindmap-api").await,
      }

      let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
      Err(failure(status, e.public_message()))
    }
  }
}

/// Any other method on /generate-mindmap
pub async fn method_not_allowed() -> ApiFailure {
  failure(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
