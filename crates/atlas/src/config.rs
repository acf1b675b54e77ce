//! Process configuration
//!
//! Everything the service needs from its environment is read once, at
//! startup, into a [`Config`] that is then handed to the generator and the
//! server. Handlers never consult the environment themselves.

use anyhow::{Context, Result};
use clap::Args;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_PORT: u16 = 3000;

/// Command-line and environment configuration shared by the CLI and server
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
  /// API key for the chat-completion service
  #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
  pub api_key: Option<String>,

  /// Chat-completion endpoint URL
  #[arg(long, env = "OPENAI_API_ENDPOINT", default_value = DEFAULT_API_ENDPOINT)]
  pub api_endpoint: String,

  /// Model identifier sent with every completion request
  #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
  pub model: String,

  /// Outbound request timeout in seconds (client default when unset)
  #[arg(long, env = "ATLAS_REQUEST_TIMEOUT_SECS")]
  pub request_timeout_secs: Option<u64>,

  /// Directory to publish generated mind-map pages into
  #[arg(long, env = "ATLAS_OUTPUT_DIR")]
  pub output_dir: Option<PathBuf>,

  /// Address to listen on
  #[arg(long, env = "ATLAS_HOST", default_value = "0.0.0.0")]
  pub host: IpAddr,

  /// Port to listen on
  #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
  pub port: u16,

  /// Diagnostic log file (defaults to ~/.atlas/server.logs.jsonl)
  #[arg(long, env = "ATLAS_LOGS_PATH")]
  pub logs_path: Option<PathBuf>,
}

/// Resolved configuration, built once per process
#[derive(Debug, Clone)]
pub struct Config {
  pub api_key: Option<String>,
  pub api_endpoint: String,
  pub model: String,
  pub request_timeout: Option<Duration>,
  pub output_dir: Option<PathBuf>,
  pub host: IpAddr,
  pub port: u16,
  pub logs_path: PathBuf,
}

impl ConfigArgs {
  pub fn into_config(self) -> Result<Config> {
    let logs_path = match self.logs_path {
      Some(path) => path,
      None => default_logs_path()?,
    };

    Ok(Config {
      api_key: self.api_key.filter(|key| !key.trim().is_empty()),
      api_endpoint: self.api_endpoint,
      model: self.model,
      request_timeout: self.request_timeout_secs.map(Duration::from_secs),
      output_dir: self.output_dir,
      host: self.host,
      port: self.port,
      logs_path,
    })
  }
}

impl Config {
  /// Configuration with defaults for everything but the credential
  pub fn new(api_key: Option<String>) -> Self {
    Self {
      api_key,
      api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
      model: DEFAULT_MODEL.to_string(),
      request_timeout: None,
      output_dir: None,
      host: IpAddr::from([0, 0, 0, 0]),
      port: DEFAULT_PORT,
      logs_path: PathBuf::from("server.logs.jsonl"),
    }
  }

  /// Whether generated pages are written to disk
  pub fn persists(&self) -> bool {
    self.output_dir.is_some()
  }

  pub fn bind_addr(&self) -> SocketAddr {
    SocketAddr::new(self.host, self.port)
  }
}

fn default_logs_path() -> Result<PathBuf> {
  let home = dirs::home_dir().context("failed to determine home directory")?;
  Ok(home.join(".atlas").join("server.logs.jsonl"))
}
