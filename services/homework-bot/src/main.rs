//! Homework bot CLI
//!
//! Starts polling immediately; secrets come from the environment.

use std::path::PathBuf;

use clap::Parser;
use homework_bot::{load_config, Config, Credentials};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Homework review status poller with Telegram notifications")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}",
        args.config,
        args.log_level
    );

    let config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    let credentials = Credentials::from_env()?;

    tracing::info!("Starting homework bot");
    tracing::debug!(
        "Endpoint: {}, interval: {}s, policies: empty={:?} watermark={:?} records={:?}",
        config.api.endpoint,
        config.polling.interval_seconds,
        config.polling.empty_homeworks,
        config.polling.watermark,
        config.polling.records
    );

    homework_bot::run(config, credentials).await?;

    Ok(())
}
