//! Chatkb REST Server
//!
//! Relays chat requests to the configured completion API and serves the
//! recent-history and knowledge-base endpoints.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use chatkb::config::Config;
use chatkb::server::startup::start_server;

#[derive(Parser)]
#[command(name = "chatkb_server")]
#[command(about = "Chat relay with a persisted knowledge base")]
#[command(version)]
struct Args {
  /// Path to the YAML configuration file
  #[arg(short, long, env = "CHATKB_CONFIG", default_value = "config.yaml")]
  config: PathBuf,

  /// Bind address, overriding server.host and server.port
  #[arg(long)]
  bind: Option<String>,

  /// Directory holding templates/ and static/ for the browser front end
  #[arg(long, default_value = ".")]
  frontend: PathBuf,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if args.verbose {
      EnvFilter::new("debug,hyper=info,reqwest=info")
    } else {
      EnvFilter::new("chatkb=info,bentley=info,tower_http=info,warn")
    }
  });
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  let config = Config::load_from_file(&args.config)
    .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
  let bind = args.bind.unwrap_or_else(|| config.server.bind_address());

  bentley::announce!(&format!("Starting Chatkb Server v{}", env!("CARGO_PKG_VERSION")));
  bentley::info!(&format!("Default model: {}", config.models.default));

  start_server(config, &bind, &args.frontend).await
}
