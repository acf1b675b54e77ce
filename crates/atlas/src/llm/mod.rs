//! Chat-completion service abstraction
//!
//! The generator only ever talks to a [`CompletionService`]. Production uses
//! [`OpenAiClient`]; tests substitute stubs that count calls.

use serde::{Deserialize, Serialize};

pub mod models;
pub mod openai;

pub use openai::OpenAiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  System,
  User,
  Assistant,
}

/// A role-tagged message in a completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role: Role,
  pub content: String,
}

impl ChatMessage {
  pub fn system(content: impl Into<String>) -> Self {
    Self { role: Role::System, content: content.into() }
  }

  pub fn user(content: impl Into<String>) -> Self {
    Self { role: Role::User, content: content.into() }
  }
}

/// Result of one completion call
///
/// Failures are values rather than errors so the caller has to decide how
/// each one maps onto its own error taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
  /// Content of the first choice
  Success { content: String },

  /// Upstream status (absent for transport errors) and operator diagnostic
  Failure { status: Option<u16>, diagnostic: String },
}

impl CompletionOutcome {
  pub fn failure(status: Option<u16>, diagnostic: impl Into<String>) -> Self {
    Self::Failure { status, diagnostic: diagnostic.into() }
  }
}

/// A chat-completion backend
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
  /// Submit one non-streamed completion request
  async fn complete(&self, model: &str, messages: Vec<ChatMessage>) -> CompletionOutcome;
}
