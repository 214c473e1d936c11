//! Oracle connectivity check

use anyhow::Result;

use foresight_core::{EngineConfig, ForecastOracle};

/// Test oracle connection and configuration
pub async fn cmd_check() -> Result<()> {
    println!("🔍 Checking oracle configuration...\n");

    let config = EngineConfig::load();

    let oracle = match config.oracle() {
        Some(oracle) => {
            println!("  Oracle host: {}", oracle.host());
            println!("  Oracle model: {}", oracle.model());
            println!("  Lookback: {} days", config.lookback_days);
            oracle
        }
        None => {
            println!("  ⚠️  No oracle configured (OLLAMA_HOST not set)");
            println!("\nForecasts will use the deterministic fallback projector.");
            println!("\nTo enable the oracle:");
            println!("  1. Install Ollama: https://ollama.ai/download");
            println!("  2. Start the server: ollama serve");
            println!("  3. Pull a model: ollama pull {}", config.oracle_model);
            println!("  4. export OLLAMA_HOST=http://localhost:11434");
            return Ok(());
        }
    };

    print!("\nChecking oracle availability... ");
    if oracle.health_check().await {
        println!("✅ Connected");
    } else {
        println!("❌ Failed");
        println!(
            "\n⚠️  Could not connect to the oracle at {}",
            oracle.host()
        );
        return Ok(());
    }

    print!("Requesting a test completion... ");
    match oracle.complete("Reply with the single word: ready").await {
        Ok(text) => println!("✅ \"{}\"", text.trim()),
        Err(e) => println!("❌ Error: {}", e),
    }

    Ok(())
}
