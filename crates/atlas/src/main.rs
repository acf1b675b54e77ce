use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;
use std::sync::Arc;

use atlas::{config::ConfigArgs, llm::OpenAiClient, MindMapGenerator};

#[derive(Parser)]
#[command(name = "atlas")]
#[command(about = "Atlas - AI mind-map generator\nTurn any topic into markmap-ready markdown")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), ", courtesy of Kernelle Software"))]
struct Cli {
  #[command(flatten)]
  config: ConfigArgs,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Generate a mind map for a topic and print its markdown
  Generate {
    /// Subject of the mind map
    topic: String,
  },
}

async fn generate(generator: &MindMapGenerator, topic: &str) -> Result<()> {
  match generator.generate(Some(topic)).await {
    Ok(result) => {
      println!("{}", result.markdown);
      if let Some(filename) = result.filename {
        herald::success!(&format!("Wrote {filename}"));
      }
      Ok(())
    }
    Err(e) => {
      herald::debug!(&e.to_string());
      herald::error!(e.public_message());
      process::exit(1);
    }
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let _ = dotenvy::dotenv();
  let cli = Cli::parse();

  let config = Arc::new(cli.config.into_config()?);
  let client = OpenAiClient::new(&config)?;
  let generator = MindMapGenerator::new(config, Arc::new(client));

  match cli.command {
    Command::Generate { topic } => generate(&generator, &topic).await,
  }
}
