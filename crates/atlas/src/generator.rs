//! Mind-map generation: validation, one completion call, optional publish

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::llm::{CompletionOutcome, CompletionService};
use crate::page::PageWriter;
use crate::prompt;

/// Message returned to callers for any failure during generation
pub const GENERATION_FAILED: &str = "An error occurred while generating the mind map.";

#[derive(Error, Debug)]
pub enum GenerateError {
  #[error("Topic is required")]
  InvalidInput,

  #[error("OPENAI_API_KEY is not configured")]
  Configuration,

  #[error("Completion request failed (status: {}): {detail}", .status.map_or_else(|| "none".to_string(), |s| s.to_string()))]
  Upstream { status: Option<u16>, detail: String },

  #[error("Failed to write mind map page to {}: {source}", .dir.display())]
  Persistence {
    dir: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl GenerateError {
  pub fn upstream(status: Option<u16>, detail: impl Into<String>) -> Self {
    Self::Upstream { status, detail: detail.into() }
  }

  pub fn persistence(dir: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Persistence { dir: dir.into(), source }
  }

  /// HTTP status this error surfaces as
  pub fn status_code(&self) -> u16 {
    match self {
      GenerateError::InvalidInput => 400,
      GenerateError::Configuration
      | GenerateError::Upstream { .. }
      | GenerateError::Persistence { .. } => 500,
    }
  }

  /// Caller-facing message, free of upstream or filesystem detail
  pub fn public_message(&self) -> &'static str {
    match self {
      GenerateError::InvalidInput => "Topic is required",
      GenerateError::Configuration => "Server configuration error",
      GenerateError::Upstream { .. } | GenerateError::Persistence { .. } => GENERATION_FAILED,
    }
  }
}

/// Generated markdown, plus the published page when persisting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub filename: Option<String>,
  pub markdown: String,
}

/// Turns topics into mind-map markdown
pub struct MindMapGenerator {
  config: Arc<Config>,
  service: Arc<dyn CompletionService>,
  pages: Option<PageWriter>,
}

impl MindMapGenerator {
  pub fn new(config: Arc<Config>, service: Arc<dyn CompletionService>) -> Self {
    let pages = config.output_dir.clone().map(PageWriter::new);
    Self { config, service, pages }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Generate a mind map for `topic`
  ///
  /// Makes at most one completion call and, when persisting, at most one
  /// page write. Configuration and topic problems are reported before any
  /// outbound call.
  pub async fn generate(&self, topic: Option<&str>) -> Result<GenerationResult, GenerateError> {
    if self.config.api_key.is_none() {
      return Err(GenerateError::Configuration);
    }

    let topic = match topic {
      Some(topic) if !topic.trim().is_empty() => topic,
      _ => return Err(GenerateError::InvalidInput),
    };

    let messages = prompt::compose(topic);
    let markdown = match self.service.complete(&self.config.model, messages).await {
      CompletionOutcome::Success { content } => content,
      CompletionOutcome::Failure { status, diagnostic } => {
        return Err(GenerateError::upstream(status, diagnostic));
      }
    };

    let filename = match &self.pages {
      Some(pages) => Some(
        pages
          .write(topic, &markdown)
          .await
          .map_err(|e| GenerateError::persistence(pages.output_dir(), e))?,
      ),
      None => None,
    };

    Ok(GenerationResult { filename, markdown })
  }
}
