//! Domain models for Foresight
//!
//! Field names and enum spellings on [`Forecast`] are the wire contract with
//! the rendering layer and must not change: camelCase fields, UPPERCASE enum
//! values (`WEEK|MONTH|YEAR`, `INCREASING|DECREASING|STABLE`, `AI|FALLBACK`).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Direction of money movement on a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction as supplied by the remote ledger
///
/// Immutable once fetched; the engine never mutates or persists transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Remote API identifier
    pub id: String,
    /// Non-negative amount; the sign lives in `kind`
    pub amount: f64,
    pub kind: TransactionKind,
    /// Free-form category label, case-sensitive, no normalization
    pub category: String,
    pub occurred_on: NaiveDate,
}

/// Forecast horizon requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ForecastPeriod {
    Week,
    Month,
    Year,
}

impl ForecastPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "WEEK",
            Self::Month => "MONTH",
            Self::Year => "YEAR",
        }
    }

    pub fn all() -> &'static [ForecastPeriod] {
        &[Self::Week, Self::Month, Self::Year]
    }
}

impl FromStr for ForecastPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WEEK" => Ok(Self::Week),
            "MONTH" => Ok(Self::Month),
            "YEAR" => Ok(Self::Year),
            _ => Err(format!("Unknown forecast period: {}", s)),
        }
    }
}

impl fmt::Display for ForecastPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending trend label on a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "INCREASING",
            Self::Decreasing => "DECREASING",
            Self::Stable => "STABLE",
        }
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INCREASING" => Ok(Self::Increasing),
            "DECREASING" => Ok(Self::Decreasing),
            "STABLE" => Ok(Self::Stable),
            _ => Err(format!("Unknown trend: {}", s)),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provenance of a forecast: oracle-derived or deterministic fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ForecastSource {
    Ai,
    Fallback,
}

impl ForecastSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "AI",
            Self::Fallback => "FALLBACK",
        }
    }
}

impl fmt::Display for ForecastSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fixed-length rolling time window over the transaction history
///
/// `end_date` is exclusive. Buckets are produced in groups of four, counted
/// backward from "now", most-recent first, contiguous and non-overlapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total: f64,
    pub count: u32,
    pub average: f64,
}

/// One entry of the top-category breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// In [0, 100]; 0 when the aggregate total is 0
    pub percentage_of_total: f64,
}

/// Derived summary of a transaction set
///
/// Invariant: the category totals sum to `total_amount`, since every expense
/// transaction is attributed to exactly one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub total_amount: f64,
    pub transaction_count: u32,
    pub average_transaction: f64,
    pub category_totals: BTreeMap<String, f64>,
    /// At most 5, sorted descending by amount, first-seen tie-break
    pub top_categories: Vec<CategoryShare>,
    pub weekly_buckets: Vec<PeriodBucket>,
    pub monthly_buckets: Vec<PeriodBucket>,
    pub quarterly_buckets: Vec<PeriodBucket>,
}

/// A structured spending forecast
///
/// Created fresh on every uncached request; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub period: ForecastPeriod,
    pub total_forecast: f64,
    pub category_forecasts: BTreeMap<String, f64>,
    pub trend: Trend,
    /// In [0, 100]
    pub confidence: u8,
    pub recommendations: Vec<String>,
    pub insights: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub source: ForecastSource,
}
