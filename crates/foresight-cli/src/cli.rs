//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Foresight - Spending forecasts from your transaction history
#[derive(Parser)]
#[command(name = "foresight")]
#[command(about = "Spending forecast engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Forecast cache database path
    #[arg(long, default_value = "foresight.db", global = true)]
    pub cache: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a spending forecast from a transaction file
    Forecast {
        /// Transaction file (CSV ledger or JSON array)
        #[arg(short, long)]
        file: PathBuf,

        /// Forecast horizon: week, month, year
        #[arg(short, long, default_value = "month")]
        period: String,

        /// Skip the durable cache for this run
        #[arg(long)]
        no_cache: bool,

        /// Print the forecast as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Summarize a transaction file without consulting the oracle
    Aggregate {
        /// Transaction file (CSV ledger or JSON array)
        #[arg(short, long)]
        file: PathBuf,

        /// Print the aggregate as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Check oracle connectivity and configuration
    Check,
}
