//! Mock oracle for testing
//!
//! Returns a canned completion and counts calls, so tests can assert on
//! cache behavior (did a second request reach the oracle?) and on fallback
//! paths (what happens when the oracle errors or returns garbage?).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::ForecastOracle;

/// Canned response used by `MockOracle::new`
const DEFAULT_RESPONSE: &str = r#"{
    "totalForecast": 100.0,
    "categoryForecasts": {"Food": 80.0, "Transport": 20.0},
    "trend": "STABLE",
    "confidence": 85,
    "recommendations": ["Keep grocery spending steady"],
    "insights": ["Food dominates your spending"]
}"#;

/// Mock forecast oracle
#[derive(Clone)]
pub struct MockOracle {
    response: Option<String>,
    calls: Arc<AtomicUsize>,
    healthy: bool,
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOracle {
    /// Create a mock that answers with a well-formed forecast JSON
    pub fn new() -> Self {
        Self::with_response(DEFAULT_RESPONSE)
    }

    /// Create a mock that answers with the given text
    pub fn with_response(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
            healthy: true,
        }
    }

    /// Create a mock whose completions always fail
    pub fn failing() -> Self {
        Self {
            response: None,
            calls: Arc::new(AtomicUsize::new(0)),
            healthy: false,
        }
    }

    /// Number of completions requested so far (across clones)
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForecastOracle for MockOracle {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(Error::Oracle("mock oracle configured to fail".into())),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls_across_clones() {
        let oracle = MockOracle::with_response("hello");
        let clone = oracle.clone();

        assert_eq!(oracle.complete("a").await.unwrap(), "hello");
        assert_eq!(clone.complete("b").await.unwrap(), "hello");
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let oracle = MockOracle::failing();
        assert!(oracle.complete("a").await.is_err());
        assert!(!oracle.health_check().await);
        assert_eq!(oracle.call_count(), 1);
    }
}
