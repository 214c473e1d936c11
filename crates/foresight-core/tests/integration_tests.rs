//! Integration tests for foresight-core
//!
//! These tests exercise the full fetch → aggregate → oracle → parse/fallback
//! → cache workflow, including the degraded paths.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

use foresight_core::test_utils::MockOracleServer;
use foresight_core::{
    aggregate, Error, ForecastCache, ForecastOracle, ForecastPeriod, ForecastService,
    ForecastSource, MemoryStore, MockOracle, OllamaOracle, OracleClient, Result, StaticSource,
    Transaction, TransactionKind, TransactionSource, Trend,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

fn expense(id: &str, amount: f64, category: &str, days_ago: i64) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount,
        kind: TransactionKind::Expense,
        category: category.to_string(),
        occurred_on: today() - Duration::days(days_ago),
    }
}

/// Food 50 + Food 30 + Transport 20, all within the current month
fn current_month_transactions() -> Vec<Transaction> {
    vec![
        expense("t1", 50.0, "Food", 3),
        expense("t2", 30.0, "Food", 8),
        expense("t3", 20.0, "Transport", 5),
    ]
}

fn service(
    transactions: Vec<Transaction>,
    oracle: Option<MockOracle>,
) -> ForecastService<StaticSource> {
    ForecastService::new(
        StaticSource::new(transactions),
        oracle.map(OracleClient::Mock),
        ForecastCache::new(Box::new(MemoryStore::new())),
    )
}

// =============================================================================
// Scenario A: aggregation of a simple month
// =============================================================================

#[test]
fn test_scenario_a_aggregation() {
    let agg = aggregate(&current_month_transactions(), today());

    assert_eq!(agg.total_amount, 100.0);
    assert_eq!(agg.category_totals["Food"], 80.0);
    assert_eq!(agg.category_totals["Transport"], 20.0);

    assert_eq!(agg.top_categories.len(), 2);
    assert_eq!(agg.top_categories[0].category, "Food");
    assert_eq!(agg.top_categories[0].amount, 80.0);
    assert_eq!(agg.top_categories[0].percentage_of_total, 80.0);
    assert_eq!(agg.top_categories[1].category, "Transport");
    assert_eq!(agg.top_categories[1].amount, 20.0);
    assert_eq!(agg.top_categories[1].percentage_of_total, 20.0);

    let sum: f64 = agg.category_totals.values().sum();
    assert_eq!(sum, agg.total_amount);
}

// =============================================================================
// Scenario B: non-JSON oracle text falls back to the projector
// =============================================================================

#[tokio::test]
async fn test_scenario_b_non_json_oracle_falls_back() {
    let oracle = MockOracle::with_response("I cannot help with that");
    let svc = service(current_month_transactions(), Some(oracle.clone()));

    let forecast = svc.forecast_at(ForecastPeriod::Month, today()).await;

    assert_eq!(oracle.call_count(), 1);
    assert_eq!(forecast.source, ForecastSource::Fallback);
    // one observed month, averageMonthly = 100
    assert_eq!(forecast.total_forecast, 100.0);
    assert_eq!(forecast.category_forecasts["Food"], 80.0);
}

// =============================================================================
// Scenario C: the WEEK multiplier
// =============================================================================

#[tokio::test]
async fn test_scenario_c_week_multiplier() {
    let svc = service(
        current_month_transactions(),
        Some(MockOracle::with_response("no json here")),
    );
    let forecast = svc.forecast_at(ForecastPeriod::Week, today()).await;
    assert_eq!(forecast.source, ForecastSource::Fallback);
    assert_eq!(forecast.total_forecast, 25.0);
}

// =============================================================================
// Scenario D: partial oracle JSON self-heals
// =============================================================================

#[tokio::test]
async fn test_scenario_d_partial_json_self_heals() {
    let oracle = MockOracle::with_response(r#"{"totalForecast": 120, "trend": "up"}"#);
    let svc = service(current_month_transactions(), Some(oracle));

    let forecast = svc.forecast_at(ForecastPeriod::Month, today()).await;

    assert_eq!(forecast.source, ForecastSource::Ai);
    assert_eq!(forecast.total_forecast, 120.0);
    // "up" is not an accepted spelling
    assert_eq!(forecast.trend, Trend::Stable);
    assert_eq!(forecast.confidence, 70);
    assert!(forecast.recommendations.is_empty());
}

// =============================================================================
// Scenario E: zero transactions
// =============================================================================

#[tokio::test]
async fn test_scenario_e_zero_transactions() {
    let oracle = MockOracle::new();
    let svc = service(vec![], Some(oracle.clone()));

    let forecast = svc.forecast_at(ForecastPeriod::Month, today()).await;

    assert_eq!(oracle.call_count(), 0);
    assert_eq!(forecast.total_forecast, 0.0);
    assert_eq!(forecast.source, ForecastSource::Fallback);
    assert!(forecast
        .insights
        .iter()
        .any(|i| i.to_lowercase().contains("insufficient data")));
}

// =============================================================================
// Cache behavior
// =============================================================================

#[tokio::test]
async fn test_same_day_second_call_skips_oracle() {
    let oracle = MockOracle::new();
    let svc = service(current_month_transactions(), Some(oracle.clone()));

    let first = svc.forecast_at(ForecastPeriod::Month, today()).await;
    let second = svc.forecast_at(ForecastPeriod::Month, today()).await;

    assert_eq!(oracle.call_count(), 1);
    assert_eq!(second.total_forecast, first.total_forecast);
    // provenance is preserved through the cache
    assert_eq!(second.source, ForecastSource::Ai);
}

#[tokio::test]
async fn test_next_day_issues_new_oracle_call() {
    let oracle = MockOracle::new();
    let svc = service(current_month_transactions(), Some(oracle.clone()));

    svc.forecast_at(ForecastPeriod::Month, today()).await;
    svc.forecast_at(ForecastPeriod::Month, today() + Duration::days(1))
        .await;

    assert_eq!(oracle.call_count(), 2);
}

#[tokio::test]
async fn test_periods_cache_independently() {
    let oracle = MockOracle::new();
    let svc = service(current_month_transactions(), Some(oracle.clone()));

    svc.forecast_at(ForecastPeriod::Month, today()).await;
    svc.forecast_at(ForecastPeriod::Week, today()).await;
    svc.forecast_at(ForecastPeriod::Month, today()).await;

    assert_eq!(oracle.call_count(), 2);
}

#[tokio::test]
async fn test_fallback_forecasts_are_cached_too() {
    let oracle = MockOracle::with_response("garbage");
    let svc = service(current_month_transactions(), Some(oracle.clone()));

    let first = svc.forecast_at(ForecastPeriod::Month, today()).await;
    let second = svc.forecast_at(ForecastPeriod::Month, today()).await;

    assert_eq!(oracle.call_count(), 1);
    assert_eq!(first.source, ForecastSource::Fallback);
    assert_eq!(second.source, ForecastSource::Fallback);
}

// =============================================================================
// Degraded collaborators
// =============================================================================

struct FailingSource;

#[async_trait]
impl TransactionSource for FailingSource {
    async fn fetch(&self, _since: NaiveDate) -> Result<Vec<Transaction>> {
        Err(Error::InvalidData("transport down".into()))
    }
}

#[tokio::test]
async fn test_fetch_failure_becomes_insufficient_data() {
    let svc = ForecastService::new(
        FailingSource,
        Some(OracleClient::mock()),
        ForecastCache::new(Box::new(MemoryStore::new())),
    );

    let forecast = svc.forecast_at(ForecastPeriod::Month, today()).await;
    assert_eq!(forecast.source, ForecastSource::Fallback);
    assert_eq!(forecast.total_forecast, 0.0);
    assert!(forecast
        .insights
        .iter()
        .any(|i| i.to_lowercase().contains("insufficient data")));
}

#[tokio::test]
async fn test_oracle_error_falls_back() {
    let oracle = MockOracle::failing();
    let svc = service(current_month_transactions(), Some(oracle.clone()));

    let forecast = svc.forecast_at(ForecastPeriod::Month, today()).await;
    assert_eq!(oracle.call_count(), 1);
    assert_eq!(forecast.source, ForecastSource::Fallback);
    assert_eq!(forecast.total_forecast, 100.0);
}

struct OfflineStore;

impl foresight_core::ForecastStore for OfflineStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::InvalidData("store offline".into()))
    }
    fn put(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::InvalidData("store offline".into()))
    }
}

#[tokio::test]
async fn test_cache_outage_does_not_break_forecasts() {
    let oracle = MockOracle::new();
    let svc = ForecastService::new(
        StaticSource::new(current_month_transactions()),
        Some(OracleClient::Mock(oracle.clone())),
        ForecastCache::new(Box::new(OfflineStore)),
    );

    let forecast = svc.forecast_at(ForecastPeriod::Month, today()).await;
    assert_eq!(forecast.source, ForecastSource::Ai);

    // nothing was cached, so the next call consults the oracle again
    svc.forecast_at(ForecastPeriod::Month, today()).await;
    assert_eq!(oracle.call_count(), 2);
}

// =============================================================================
// Real HTTP oracle against the mock Ollama server
// =============================================================================

#[tokio::test]
async fn test_ollama_oracle_round_trip() {
    let canned = r#"{"totalForecast": 321.0, "trend": "DECREASING", "confidence": 90}"#;
    let mut server = MockOracleServer::start(canned).await;

    let oracle = OllamaOracle::new(&server.url(), "llama3.2");
    assert!(oracle.health_check().await);

    let svc = ForecastService::new(
        StaticSource::new(current_month_transactions()),
        Some(OracleClient::Ollama(oracle)),
        ForecastCache::new(Box::new(MemoryStore::new())),
    );

    let forecast = svc.forecast_at(ForecastPeriod::Month, today()).await;
    assert_eq!(forecast.source, ForecastSource::Ai);
    assert_eq!(forecast.total_forecast, 321.0);
    assert_eq!(forecast.trend, Trend::Decreasing);
    assert_eq!(forecast.confidence, 90);

    server.stop();
}

#[tokio::test]
async fn test_ollama_oracle_unreachable_falls_back() {
    // nothing listens on this port
    let oracle = OllamaOracle::new("http://127.0.0.1:1", "llama3.2");
    assert!(!oracle.health_check().await);

    let svc = ForecastService::new(
        StaticSource::new(current_month_transactions()),
        Some(OracleClient::Ollama(oracle)),
        ForecastCache::new(Box::new(MemoryStore::new())),
    );

    let forecast = svc.forecast_at(ForecastPeriod::Month, today()).await;
    assert_eq!(forecast.source, ForecastSource::Fallback);
    assert_eq!(forecast.total_forecast, 100.0);
}
