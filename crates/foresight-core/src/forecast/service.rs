//! Forecast orchestration
//!
//! Sequences fetch → aggregate → cache check → prompt → oracle → parse-or-
//! fallback → cache → return. The contract of [`ForecastService::forecast`]
//! is that it always returns a valid forecast; a degraded forecast beats a
//! broken screen.

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::ai::{ForecastOracle, OracleClient};
use crate::config::DEFAULT_LOOKBACK_DAYS;
use crate::models::{Aggregate, Forecast, ForecastPeriod, Transaction, TransactionKind};
use crate::source::TransactionSource;

use super::aggregator::aggregate;
use super::cache::ForecastCache;
use super::parser::parse_forecast;
use super::projector::project;
use super::prompt::build_prompt;

/// The forecast engine orchestrator
///
/// Makes at most one oracle attempt per invocation; no step retries, keeping
/// worst-case latency bounded. Concurrent calls for the same `(period, day)`
/// key may both miss the cache and both consult the oracle; the cost is
/// redundant work, not corrupted state, and the final cache write wins.
pub struct ForecastService<S: TransactionSource> {
    source: S,
    oracle: Option<OracleClient>,
    cache: ForecastCache,
    lookback_days: i64,
}

impl<S: TransactionSource> ForecastService<S> {
    pub fn new(source: S, oracle: Option<OracleClient>, cache: ForecastCache) -> Self {
        Self {
            source,
            oracle,
            cache,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = days;
        self
    }

    /// Compute (or recall) the forecast for a period
    pub async fn forecast(&self, period: ForecastPeriod) -> Forecast {
        self.forecast_at(period, Utc::now().date_naive()).await
    }

    /// Same as [`Self::forecast`] with an injectable "today"
    pub async fn forecast_at(&self, period: ForecastPeriod, today: NaiveDate) -> Forecast {
        // Fetch: a transport failure is an empty dataset, not an error.
        let since = today - Duration::days(self.lookback_days);
        let transactions = match self.source.fetch(since).await {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!(error = %e, "Transaction fetch failed, proceeding with empty dataset");
                Vec::new()
            }
        };
        let expenses: Vec<Transaction> = transactions
            .into_iter()
            .filter(|tx| tx.kind == TransactionKind::Expense && tx.occurred_on >= since)
            .collect();

        let aggregate = aggregate(&expenses, today);

        if let Some(cached) = self.cache.get(period, today) {
            debug!(period = period.as_str(), "Returning cached forecast");
            return cached;
        }

        let forecast = match self.consult_oracle(&aggregate, period).await {
            Some(forecast) => forecast,
            None => project(&aggregate, period),
        };

        self.cache.put(period, today, &forecast);

        info!(
            period = period.as_str(),
            source = forecast.source.as_str(),
            total = forecast.total_forecast,
            "Forecast ready"
        );
        forecast
    }

    /// One oracle attempt; None on any failure routes the caller to fallback
    async fn consult_oracle(
        &self,
        aggregate: &Aggregate,
        period: ForecastPeriod,
    ) -> Option<Forecast> {
        if aggregate.transaction_count == 0 {
            debug!("No expense transactions, skipping oracle");
            return None;
        }
        let oracle = self.oracle.as_ref()?;

        let prompt = build_prompt(aggregate, period);
        let raw = match oracle.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Oracle call failed, falling back");
                return None;
            }
        };

        match parse_forecast(&raw, period) {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                warn!(error = %e, "Oracle response unusable, falling back");
                None
            }
        }
    }
}
