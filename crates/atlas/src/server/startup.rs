//! Server startup

use anyhow::{Context, Result};
use axum::serve;
use herald::diagnostics::DiagnosticLog;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::generator::MindMapGenerator;
use crate::llm::OpenAiClient;
use crate::server::{routing::create_router, AppState};

/// Start the REST server and run until it stops
pub async fn start_server(config: Config) -> Result<()> {
  let addr = config.bind_addr();
  let logs = DiagnosticLog::open(&config.logs_path)
    .with_context(|| format!("failed to open diagnostic log at {}", config.logs_path.display()))?;

  logs.info(&format!("Starting atlas server on {addr}"), "atlas-server").await;

  if config.api_key.is_some() {
    logs.info("OpenAI API key: set", "atlas-server").await;
  } else {
    // Still serve: every generation request will report a configuration error
    logs.warn("OpenAI API key: not set", "atlas-server").await;
  }

  match &config.output_dir {
    Some(dir) => logs.info(&format!("Publishing mind map pages to {}", dir.display()), "atlas-server").await,
    None => logs.info("Page publishing disabled; returning markdown only", "atlas-server").await,
  }

  let config = Arc::new(config);
  let client = OpenAiClient::new(&config).context("failed to build completion client")?;
  let generator = MindMapGenerator::new(config, Arc::new(client));
  let state = AppState::new(generator, logs.clone());

  let app = create_router(state)
    .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()));

  let listener = TcpListener::bind(addr).await.with_context(|| format!("failed to bind {addr}"))?;
  logs.success(&format!("Server running on http://{addr}"), "atlas-server").await;

  match serve(listener, app).await {
    Ok(()) => {
      logs.info("Server shutdown gracefully", "atlas-server").await;
      Ok(())
    }
    Err(e) => {
      logs.error(&format!("Server error: {e}"), "atlas-server").await;
      Err(anyhow::anyhow!("Server error: {e}"))
    }
  }
}
