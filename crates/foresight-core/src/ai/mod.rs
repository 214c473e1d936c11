//! Pluggable forecast oracle abstraction
//!
//! The oracle is a free-text generative completion service: one prompt in,
//! free text out. It is modeled as a capability interface so any
//! text-generation backend can be substituted; the response parser — not a
//! typed wire contract — is what tolerates the oracle's unreliability.
//!
//! # Architecture
//!
//! - `ForecastOracle` trait: the collaborator interface
//! - `OracleClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OllamaOracle`, `MockOracle`
//!
//! # Configuration
//!
//! Environment variables:
//! - `OLLAMA_HOST`: Ollama server URL (required for a live oracle)
//! - `OLLAMA_MODEL`: Model name (default: llama3.2)

mod mock;
mod ollama;

pub use mock::MockOracle;
pub use ollama::OllamaOracle;

use async_trait::async_trait;

use crate::error::Result;

/// Free-text generative completion collaborator
///
/// Implementations must be Send + Sync to allow use across async tasks.
/// One prompt per call, no multi-turn conversation; the connection is
/// released on every exit path.
#[async_trait]
pub trait ForecastOracle: Send + Sync {
    /// Send one prompt and return the raw completion text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name (for diagnostics)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete oracle client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum OracleClient {
    /// Ollama backend (HTTP API)
    Ollama(OllamaOracle),
    /// Mock backend for testing
    Mock(MockOracle),
}

impl OracleClient {
    /// Create an oracle client from environment variables
    ///
    /// Returns None when `OLLAMA_HOST` is not set; the engine then runs on
    /// the deterministic fallback alone.
    pub fn from_env() -> Option<Self> {
        OllamaOracle::from_env().map(OracleClient::Ollama)
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str) -> Self {
        OracleClient::Ollama(OllamaOracle::new(host, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        OracleClient::Mock(MockOracle::new())
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            OracleClient::Ollama(b) => OracleClient::Ollama(b.with_model(model)),
            OracleClient::Mock(b) => OracleClient::Mock(b.clone()),
        }
    }
}

#[async_trait]
impl ForecastOracle for OracleClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match self {
            OracleClient::Ollama(b) => b.complete(prompt).await,
            OracleClient::Mock(b) => b.complete(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            OracleClient::Ollama(b) => b.health_check().await,
            OracleClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            OracleClient::Ollama(b) => b.model(),
            OracleClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            OracleClient::Ollama(b) => b.host(),
            OracleClient::Mock(b) => b.host(),
        }
    }
}
