//! Fifteen - sliding tile puzzle for the terminal.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod images;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (image auth token, RUST_LOG)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Log to a file so tracing output doesn't corrupt the terminal UI.
    let log_file = std::fs::File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    let config = AppConfig::load(&cli)?;
    info!(?config, "starting fifteen");

    tui::run(config, cli.seed).await
}
