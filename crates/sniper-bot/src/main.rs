//! Listing sniper - entry point.
//!
//! Sells each configured account's balance of a newly listed token as
//! soon as trading opens, then writes one JSON report per account.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// KuCoin token-listing sell bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via SNIPER_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    sniper_telemetry::init_logging()?;

    info!("Starting listing sniper v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > SNIPER_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("SNIPER_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");

    let config = sniper_bot::AppConfig::from_file(&config_path)?;

    let app = sniper_bot::Application::new(config);
    app.run().await?;

    Ok(())
}
