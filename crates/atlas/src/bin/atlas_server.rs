//! Atlas REST Server
//!
//! HTTP server that turns topics into mind-map markdown, optionally
//! publishing each result as a static HTML page.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use atlas::{config::ConfigArgs, server::startup::start_server};

#[derive(Parser)]
#[command(name = "atlas_server")]
#[command(about = "Atlas mind-map REST server")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), ", courtesy of Kernelle Software"))]
struct Args {
  #[command(flatten)]
  config: ConfigArgs,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  // A missing .env file is fine; the environment may already be populated
  let _ = dotenvy::dotenv();
  let args = Args::parse();

  let filter = if args.verbose {
    EnvFilter::new("info,hyper=warn,reqwest=warn")
  } else {
    EnvFilter::new("atlas=info,tower_http=info,warn")
  };
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  herald::announce!(&format!("Atlas REST Server v{}", env!("CARGO_PKG_VERSION")));

  let config = args.config.into_config()?;
  herald::info!(&format!("Binding to address: {}", config.bind_addr()));

  start_server(config).await?;

  Ok(())
}
