use anyhow::Result;

use super::models::{ChatRequest, ChatResponse};
use super::{ChatMessage, CompletionOutcome, CompletionService};
use crate::config::Config;

/// OpenAI-compatible chat completions client
pub struct OpenAiClient {
  client: reqwest::Client,
  endpoint: String,
  api_key: Option<String>,
}

impl OpenAiClient {
  pub fn new(config: &Config) -> Result<Self> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.request_timeout {
      builder = builder.timeout(timeout);
    }

    Ok(Self {
      client: builder.build()?,
      endpoint: config.api_endpoint.clone(),
      api_key: config.api_key.clone(),
    })
  }
}

#[async_trait::async_trait]
impl CompletionService for OpenAiClient {
  async fn complete(&self, model: &str, messages: Vec<ChatMessage>) -> CompletionOutcome {
    let Some(api_key) = self.api_key.as_deref() else {
      return CompletionOutcome::failure(None, "no API key configured");
    };

    let request = ChatRequest { model, messages: &messages };
    tracing::debug!(model, endpoint = %self.endpoint, "sending chat completion request");

    let response = match self
      .client
      .post(&self.endpoint)
      .bearer_auth(api_key)
      .json(&request)
      .send()
      .await
    {
      Ok(response) => response,
      Err(e) => return CompletionOutcome::failure(None, format!("request failed: {e}")),
    };

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      tracing::warn!(%status, "chat completion request rejected");
      return CompletionOutcome::failure(Some(status.as_u16()), format!("{status}: {body}"));
    }

    let body = match response.text().await {
      Ok(body) => body,
      Err(e) => {
        return CompletionOutcome::failure(Some(status.as_u16()), format!("failed to read body: {e}"))
      }
    };

    let parsed = match serde_json::from_str::<ChatResponse>(&body) {
      Ok(parsed) => parsed,
      Err(e) => {
        return CompletionOutcome::failure(
          Some(status.as_u16()),
          format!("malformed completion response ({e}): {body}"),
        )
      }
    };

    match parsed.first_content() {
      Some(content) => CompletionOutcome::Success { content },
      None => CompletionOutcome::failure(
        Some(status.as_u16()),
        format!("completion response has no message content: {body}"),
      ),
    }
  }
}
