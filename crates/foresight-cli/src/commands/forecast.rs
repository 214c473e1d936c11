//! Forecast command implementation

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use foresight_core::{
    EngineConfig, FileSource, ForecastCache, ForecastPeriod, ForecastService, MemoryStore,
    SqliteStore,
};

/// Compute and print a forecast for a transaction file
pub async fn cmd_forecast(
    file: &Path,
    period: &str,
    cache_path: &Path,
    no_cache: bool,
    json: bool,
) -> Result<()> {
    let period = ForecastPeriod::from_str(period).map_err(|e| anyhow::anyhow!(e))?;

    let config = EngineConfig::load();
    let oracle = config.oracle();
    if oracle.is_none() {
        tracing::info!("No oracle configured (set OLLAMA_HOST), using fallback projections");
    }

    let cache = if no_cache {
        ForecastCache::new(Box::new(MemoryStore::new()))
    } else {
        let store = SqliteStore::open(cache_path)
            .with_context(|| format!("Failed to open cache at {}", cache_path.display()))?;
        ForecastCache::new(Box::new(store))
    };

    let service = ForecastService::new(FileSource::new(file), oracle, cache)
        .with_lookback_days(config.lookback_days);

    let forecast = service.forecast(period).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
        return Ok(());
    }

    println!(
        "📈 {} forecast: ${:.2} ({}, confidence {}%)",
        forecast.period, forecast.total_forecast, forecast.trend, forecast.confidence
    );
    println!("   Source: {}", forecast.source);

    if !forecast.category_forecasts.is_empty() {
        println!("\nBy category:");
        for (category, amount) in &forecast.category_forecasts {
            println!("  {:<20} ${:.2}", category, amount);
        }
    }

    if !forecast.insights.is_empty() {
        println!("\nInsights:");
        for insight in &forecast.insights {
            println!("  • {}", insight);
        }
    }

    if !forecast.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in &forecast.recommendations {
            println!("  • {}", recommendation);
        }
    }

    Ok(())
}
