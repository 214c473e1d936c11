//! Oracle response parsing
//!
//! Extracts a structured forecast from free oracle text. Only a missing JSON
//! block, undecodable JSON, or an unusable `totalForecast` are hard failures;
//! every other field self-heals to a default. A usable total is the minimum
//! viable forecast, everything else is advisory.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Forecast, ForecastPeriod, ForecastSource, Trend};

/// Confidence assigned when the oracle omits one
pub const DEFAULT_CONFIDENCE: u8 = 70;

/// Hard parse failures that force the caller to fall back
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("No JSON object found in oracle response")]
    NoJsonFound,

    #[error("Invalid JSON in oracle response: {0}")]
    InvalidJson(String),

    #[error("Oracle response is missing a usable totalForecast")]
    MissingTotal,
}

/// Find the first balanced `{...}` block in free text
///
/// Brace-depth scan rather than a greedy find/rfind pair: oracle responses
/// may contain nested objects or stray braces after the payload.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0;

    for (i, c) in text[start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Collect string entries of an optional array, ignoring other item types
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a forecast out of raw oracle text
///
/// The requested `period` is authoritative; anything the oracle claims about
/// the period is ignored, and `source` is always AI.
pub fn parse_forecast(
    raw: &str,
    period: ForecastPeriod,
) -> std::result::Result<Forecast, ParseFailure> {
    let json_str = extract_json(raw.trim()).ok_or(ParseFailure::NoJsonFound)?;

    let value: Value =
        serde_json::from_str(json_str).map_err(|e| ParseFailure::InvalidJson(e.to_string()))?;
    let obj = value
        .as_object()
        .ok_or_else(|| ParseFailure::InvalidJson("top-level value is not an object".into()))?;

    let total_forecast = obj
        .get("totalForecast")
        .and_then(Value::as_f64)
        .ok_or(ParseFailure::MissingTotal)?
        .max(0.0);

    let category_forecasts: BTreeMap<String, f64> = obj
        .get("categoryForecasts")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
                .collect()
        })
        .unwrap_or_default();

    let trend = obj
        .get("trend")
        .and_then(Value::as_str)
        .and_then(|s| Trend::from_str(s).ok())
        .unwrap_or(Trend::Stable);

    let confidence = obj
        .get("confidence")
        .and_then(Value::as_f64)
        .map(|c| c.clamp(0.0, 100.0).round() as u8)
        .unwrap_or(DEFAULT_CONFIDENCE);

    Ok(Forecast {
        period,
        total_forecast,
        category_forecasts,
        trend,
        confidence,
        recommendations: string_list(obj.get("recommendations")),
        insights: string_list(obj.get("insights")),
        generated_at: Utc::now(),
        source: ForecastSource::Ai,
    })
}
