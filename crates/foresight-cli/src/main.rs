//! Foresight CLI - spending forecasts from the command line
//!
//! Usage:
//!   foresight forecast --file ledger.csv --period month
//!   foresight aggregate --file ledger.csv
//!   foresight check

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Forecast {
            file,
            period,
            no_cache,
            json,
        } => commands::cmd_forecast(&file, &period, &cli.cache, no_cache, json).await,
        Commands::Aggregate { file, json } => commands::cmd_aggregate(&file, json),
        Commands::Check => commands::cmd_check().await,
    }
}
