use atlas::config::Config;
use atlas::llm::OpenAiClient;
use atlas::server::{routing::create_router, AppState};
use atlas::MindMapGenerator;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use herald::diagnostics::DiagnosticLog;
use mockito::{Matcher, Server};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn post_topic(config: Config, temp: &TempDir, body: &str) -> (StatusCode, Value) {
  let logs = DiagnosticLog::open_with_silent(temp.path().join("server.logs.jsonl"), true).unwrap();
  let config = Arc::new(config);
  let client = OpenAiClient::new(&config).unwrap();
  let router = create_router(AppState::new(MindMapGenerator::new(config, Arc::new(client)), logs));

  let request = Request::builder()
    .method(Method::POST)
    .uri("/generate-mindmap")
    .body(Body::from(body.to_string()))
    .unwrap();
  let response = router.oneshot(request).await.unwrap();

  let status = response.status();
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_topic_flows_through_to_completion_api() {
  let mut server = Server::new_async().await;
  let mock = server
    .mock("POST", "/v1/chat/completions")
    .match_header("authorization", "Bearer sk-e2e")
    .match_body(Matcher::Regex("for the topic: Plate tectonics".to_string()))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r##"{"choices":[{"message":{"role":"assistant","content":"# Plate tectonics"}}]}"##)
    .expect(1)
    .create_async()
    .await;

  let temp = TempDir::new().unwrap();
  let mut config = Config::new(Some("sk-e2e".to_string()));
  config.api_endpoint = format!("{}/v1/chat/completions", server.url());
  config.model = "gpt-4".to_string();

  let (status, body) = post_topic(config, &temp, r#"{"topic":"Plate tectonics"}"#).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "markdown": "# Plate tectonics" }));
  mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_error_status_becomes_generic_500() {
  let mut server = Server::new_async().await;
  let _mock = server
    .mock("POST", "/v1/chat/completions")
    .with_status(401)
    .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
    .create_async()
    .await;

  let temp = TempDir::new().unwrap();
  let mut config = Config::new(Some("sk-wrong".to_string()));
  config.api_endpoint = format!("{}/v1/chat/completions", server.url());
  config.output_dir = Some(temp.path().join("mindmaps"));

  let (status, body) = post_topic(config, &temp, r#"{"topic":"Plate tectonics"}"#).await;

  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({ "error": "An error occurred while generating the mind map." }));
  assert!(!temp.path().join("mindmaps").exists());
}
