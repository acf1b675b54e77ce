//! Wire types for the OpenAI-compatible chat completions API

use serde::{Deserialize, Serialize};

use super::ChatMessage;

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
  pub model: &'a str,
  pub messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
  #[serde(default)]
  pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
  pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
  #[serde(default)]
  pub content: Option<String>,
}

impl ChatResponse {
  /// Content of the first choice, if the response carries one
  pub fn first_content(self) -> Option<String> {
    self.choices.into_iter().next().and_then(|choice| choice.message.content)
  }
}
