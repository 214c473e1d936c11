//! Dated forecast cache
//!
//! One forecast per `(period, calendar day)` key; a new day naturally misses
//! for every period, so no TTL bookkeeping is needed. Store failures never
//! abort the forecast flow: reads degrade to misses, writes are logged and
//! swallowed.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{Forecast, ForecastPeriod};
use crate::store::ForecastStore;

pub struct ForecastCache {
    store: Box<dyn ForecastStore>,
}

impl ForecastCache {
    pub fn new(store: Box<dyn ForecastStore>) -> Self {
        Self { store }
    }

    /// Cache key for a period on a calendar day
    fn key(period: ForecastPeriod, today: NaiveDate) -> String {
        format!("forecast:{}:{}", period.as_str(), today.format("%Y-%m-%d"))
    }

    /// Look up the forecast cached for `(period, today)`, if any
    ///
    /// Store errors and undecodable payloads are treated as misses.
    pub fn get(&self, period: ForecastPeriod, today: NaiveDate) -> Option<Forecast> {
        let key = Self::key(period, today);
        match self.store.get(&key) {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(forecast) => {
                    debug!(key = %key, "Forecast cache hit");
                    Some(forecast)
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding undecodable cached forecast");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    /// Store a forecast under `(period, today)`, overwriting unconditionally
    pub fn put(&self, period: ForecastPeriod, today: NaiveDate, forecast: &Forecast) {
        let key = Self::key(period, today);
        let payload = match serde_json::to_string(forecast) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize forecast, not caching");
                return;
            }
        };
        if let Err(e) = self.store.put(&key, &payload) {
            warn!(key = %key, error = %e, "Cache write failed, forecast not cached");
        }
    }
}
