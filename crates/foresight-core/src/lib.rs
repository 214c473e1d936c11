//! Foresight Core Library
//!
//! Shared functionality for the Foresight spending forecast engine:
//! - Transaction aggregation over rolling time windows
//! - Deterministic fallback projection
//! - Pluggable free-text oracle backends (Ollama, mock)
//! - Oracle response parsing with field-level repair
//! - Dated forecast cache over a pluggable key-value store
//! - Transaction file import (CSV/JSON)

pub mod ai;
pub mod config;
pub mod error;
pub mod forecast;
pub mod import;
pub mod models;
pub mod source;
pub mod store;

/// Test utilities including the mock Ollama server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{ForecastOracle, MockOracle, OllamaOracle, OracleClient};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use forecast::{
    aggregate, build_prompt, parse_forecast, project, ForecastCache, ForecastService, ParseFailure,
};
pub use import::FileSource;
pub use models::{
    Aggregate, CategoryShare, Forecast, ForecastPeriod, ForecastSource, PeriodBucket, Transaction,
    TransactionKind, Trend,
};
pub use source::{StaticSource, TransactionSource};
pub use store::{ForecastStore, MemoryStore, SqliteStore};
