//! Request and response bodies

use serde::{Deserialize, Serialize};

/// Body of `POST /generate-mindmap`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
  /// Subject of the mind map
  #[serde(default)]
  pub topic: Option<String>,
}

impl GenerateRequest {
  /// Parse a request body
  ///
  /// Only a JSON object is accepted; anything else (including `null`,
  /// arrays and a non-string `topic`) is `None`.
  pub fn parse(body: &[u8]) -> Option<Self> {
    match serde_json::from_slice::<serde_json::Value>(body).ok()? {
      value @ serde_json::Value::Object(_) => serde_json::from_value(value).ok(),
      _ => None,
    }
  }
}

/// Error body for every non-2xx response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
  pub error: String,
}

impl ErrorResponse {
  pub fn new(message: &str) -> Self {
    Self { error: message.to_string() }
  }
}

/// Response for `GET /status`
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
  pub status: String,
  pub version: String,
  /// Whether generated pages are written to disk
  pub persisting: bool,
}
