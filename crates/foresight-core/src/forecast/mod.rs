//! Forecast Engine
//!
//! Turns a history of raw expense transactions into a structured spending
//! forecast, consulting a free-text generative oracle when one is configured
//! and guaranteeing a deterministic statistical fallback when it is not (or
//! when it misbehaves).
//!
//! ## Components
//!
//! - **Aggregator** - category totals and rolling period buckets
//! - **Projector** - deterministic multiplier-based fallback forecast
//! - **Prompt** - renders aggregates into the oracle prompt
//! - **Parser** - extracts and repairs the oracle's structured reply
//! - **Cache** - one forecast per `(period, calendar day)`
//! - **Service** - the orchestrator tying the above together
//!
//! ## Usage
//!
//! ```rust,ignore
//! use foresight_core::forecast::{ForecastCache, ForecastService};
//!
//! let service = ForecastService::new(source, oracle, cache);
//! let forecast = service.forecast(ForecastPeriod::Month).await;
//! ```

pub mod aggregator;
pub mod cache;
pub mod parser;
pub mod projector;
pub mod prompt;
pub mod service;

pub use aggregator::{aggregate, BUCKET_COUNT, TOP_CATEGORY_LIMIT};
pub use cache::ForecastCache;
pub use parser::{parse_forecast, ParseFailure, DEFAULT_CONFIDENCE};
pub use projector::{project, FALLBACK_CONFIDENCE};
pub use prompt::build_prompt;
pub use service::ForecastService;
