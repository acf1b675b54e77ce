//! Operator-facing diagnostic log
//!
//! Entries are appended as JSON lines to a single file. The log is shared
//! across request handlers by cloning; writes are serialized behind an async
//! mutex. Upstream bodies, io errors and request timings land here so that
//! HTTP responses can stay generic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Severity of a diagnostic entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Debug,
  Info,
  Success,
  Warn,
  Error,
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Level::Debug => "debug",
      Level::Info => "info",
      Level::Success => "success",
      Level::Warn => "warn",
      Level::Error => "error",
    };
    f.write_str(name)
  }
}

/// Request metadata attached to an entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogContext {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_id: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub method: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_agent: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub status_code: Option<u16>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub duration_ms: Option<f64>,
}

/// One line of the diagnostic log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
  pub timestamp: DateTime<Utc>,
  pub level: Level,
  pub message: String,
  pub component: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub context: Option<LogContext>,
}

struct Sink {
  path: PathBuf,
  silent: bool,
}

impl Sink {
  fn open(path: &Path, silent: bool) -> io::Result<Self> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }

    // Append to an existing log rather than truncating it
    if !path.exists() {
      File::create(path)?;
    }

    Ok(Self { path: path.to_path_buf(), silent })
  }

  fn append(&mut self, entry: &LogEntry) -> io::Result<()> {
    let line = serde_json::to_string(entry)
      .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
    writeln!(file, "{line}")?;
    file.flush()
  }

  fn read(&self, limit: Option<usize>, level: Option<Level>) -> io::Result<Vec<LogEntry>> {
    if !self.path.exists() {
      return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(&self.path)?);
    let mut entries = Vec::new();

    for line in reader.lines() {
      let line = line?;
      if line.trim().is_empty() {
        continue;
      }

      let Ok(entry) = serde_json::from_str::<LogEntry>(&line) else {
        continue;
      };

      if level.is_none_or(|wanted| entry.level == wanted) {
        entries.push(entry);
      }
    }

    // Keep the most recent `limit` entries, oldest first
    if let Some(limit) = limit {
      let skip = entries.len().saturating_sub(limit);
      entries.drain(..skip);
    }

    Ok(entries)
  }
}

/// Clonable handle to a JSONL diagnostic log file
#[derive(Clone)]
pub struct DiagnosticLog {
  sink: Arc<Mutex<Sink>>,
}

impl DiagnosticLog {
  /// Open (or create) the log at `path`, echoing entries to the console
  pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
    Self::open_with_silent(path, false)
  }

  /// Open the log, optionally suppressing console echo
  pub fn open_with_silent<P: AsRef<Path>>(path: P, silent: bool) -> io::Result<Self> {
    let sink = Sink::open(path.as_ref(), silent)?;
    Ok(Self { sink: Arc::new(Mutex::new(sink)) })
  }

  /// Append an entry
  pub async fn record(
    &self,
    level: Level,
    message: &str,
    component: &str,
    context: Option<LogContext>,
  ) -> io::Result<()> {
    let entry = LogEntry {
      timestamp: Utc::now(),
      level,
      message: message.to_string(),
      component: component.to_string(),
      context,
    };

    let mut sink = self.sink.lock().await;
    sink.append(&entry)?;

    if !sink.silent {
      echo(level, message);
    }

    Ok(())
  }

  /// Append an entry with request context, ignoring write failures
  pub async fn record_with_context(
    &self,
    level: Level,
    message: &str,
    component: &str,
    context: LogContext,
  ) {
    if let Err(e) = self.record(level, message, component, Some(context)).await {
      crate::warn!(&format!("Failed to write diagnostic log: {e}"));
    }
  }

  /// Read entries back, oldest first
  pub async fn entries(&self, limit: Option<usize>, level: Option<Level>) -> io::Result<Vec<LogEntry>> {
    let sink = self.sink.lock().await;
    sink.read(limit, level)
  }
}

// Level wrappers
// ==============

#[cfg(not(tarpaulin_include))]
impl DiagnosticLog {
  async fn fire(&self, level: Level, message: &str, component: &str) {
    if let Err(e) = self.record(level, message, component, None).await {
      crate::warn!(&format!("Failed to write diagnostic log: {e}"));
    }
  }

  pub async fn debug(&self, message: &str, component: &str) {
    self.fire(Level::Debug, message, component).await;
  }

  pub async fn info(&self, message: &str, component: &str) {
    self.fire(Level::Info, message, component).await;
  }

  pub async fn success(&self, message: &str, component: &str) {
    self.fire(Level::Success, message, component).await;
  }

  pub async fn warn(&self, message: &str, component: &str) {
    self.fire(Level::Warn, message, component).await;
  }

  pub async fn error(&self, message: &str, component: &str) {
    self.fire(Level::Error, message, component).await;
  }
}

fn echo(level: Level, message: &str) {
  match level {
    Level::Debug => crate::debug(message),
    Level::Info => crate::info(message),
    Level::Success => crate::success(message),
    Level::Warn => crate::warn(message),
    Level::Error => crate::error(message),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn temp_log() -> (TempDir, PathBuf, DiagnosticLog) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("diagnostics.jsonl");
    let log = DiagnosticLog::open_with_silent(&path, true).unwrap();
    (dir, path, log)
  }

  #[tokio::test]
  async fn test_open_creates_file_and_parents() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b").join("server.jsonl");

    let log = DiagnosticLog::open_with_silent(&nested, true).unwrap();
    log.record(Level::Info, "ready", "startup", None).await.unwrap();

    assert!(nested.exists());
    assert!(fs::read_to_string(&nested).unwrap().contains("\"ready\""));
  }

  #[tokio::test]
  async fn test_record_appends_json_line() {
    let (_dir, path, log) = temp_log();

    log.record(Level::Error, "upstream returned 502", "generator", None).await.unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);

    let entry: LogEntry = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(entry.level, Level::Error);
    assert_eq!(entry.message, "upstream returned 502");
    assert_eq!(entry.component, "generator");
    assert!(entry.context.is_none());
    assert!(lines[0].contains("\"level\":\"error\""));
  }

  #[tokio::test]
  async fn test_context_round_trips() {
    let (_dir, _path, log) = temp_log();
    let context = LogContext {
      request_id: Some("abc".to_string()),
      method: Some("POST".to_string()),
      path: Some("/generate-mindmap".to_string()),
      status_code: Some(200),
      duration_ms: Some(12.5),
      ..Default::default()
    };

    log.record_with_context(Level::Info, "Request completed", "http-request", context.clone()).await;

    let entries = log.entries(None, None).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].context.as_ref(), Some(&context));
  }

  #[tokio::test]
  async fn test_entries_filter_by_level() {
    let (_dir, _path, log) = temp_log();

    log.info("first", "test").await;
    log.error("second", "test").await;
    log.info("third", "test").await;

    let infos = log.entries(None, Some(Level::Info)).await.unwrap();
    assert_eq!(infos.len(), 2);
    assert!(infos.iter().all(|e| e.level == Level::Info));

    let errors = log.entries(None, Some(Level::Error)).await.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "second");
  }

  #[tokio::test]
  async fn test_entries_limit_keeps_most_recent_oldest_first() {
    let (_dir, _path, log) = temp_log();

    for i in 1..=5 {
      log.info(&format!("Message {i}"), "test").await;
    }

    let last_two = log.entries(Some(2), None).await.unwrap();
    let messages: Vec<_> = last_two.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["Message 4", "Message 5"]);

    assert!(log.entries(Some(0), None).await.unwrap().is_empty());
    assert_eq!(log.entries(Some(50), None).await.unwrap().len(), 5);
  }

  #[tokio::test]
  async fn test_entries_skip_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mixed.jsonl");
    fs::write(
      &path,
      r#"{"timestamp":"2024-01-01T12:00:00Z","level":"info","message":"Valid","component":"test"}
not json
{"timestamp":"2024-01-01T12:01:00Z","level":"nonsense","message":"Bad level","component":"test"}
{"timestamp":"2024-01-01T12:02:00Z","level":"warn","message":"Also valid","component":"test"}
"#,
    )
    .unwrap();

    let log = DiagnosticLog::open_with_silent(&path, true).unwrap();
    let entries = log.entries(None, None).await.unwrap();

    let messages: Vec<_> = entries.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["Valid", "Also valid"]);
  }

  #[tokio::test]
  async fn test_entries_missing_file_is_empty() {
    let (_dir, path, log) = temp_log();
    fs::remove_file(&path).unwrap();

    assert!(log.entries(None, None).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_concurrent_writes_from_clones() {
    let (_dir, _path, log) = temp_log();

    let mut handles = Vec::new();
    for i in 0..10 {
      let log = log.clone();
      handles.push(tokio::spawn(async move {
        log.record(Level::Info, &format!("Message {i}"), "concurrent", None).await.unwrap();
      }));
    }
    for handle in handles {
      handle.await.unwrap();
    }

    let entries = log.entries(None, None).await.unwrap();
    assert_eq!(entries.len(), 10);
    assert!(entries.iter().all(|e| e.component == "concurrent"));
  }

  #[test]
  fn test_level_display_matches_serde_name() {
    for level in [Level::Debug, Level::Info, Level::Success, Level::Warn, Level::Error] {
      let json = serde_json::to_string(&level).unwrap();
      assert_eq!(json, format!("\"{level}\""));
    }
  }
}
