//! Ollama oracle implementation
//!
//! HTTP client for the Ollama generate API. Non-streaming: one request per
//! completion, bounded by a per-call timeout so the orchestrator's worst-case
//! latency stays predictable.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::ForecastOracle;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Ollama-backed forecast oracle
#[derive(Clone)]
pub struct OllamaOracle {
    http_client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaOracle {
    /// Create a new Ollama oracle
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
            timeout: self.timeout,
        }
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("OLLAMA_HOST").ok()?;
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string());
        Some(Self::new(&host, &model))
    }
}

/// Request to Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl ForecastOracle for OllamaOracle {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let ollama_response: OllamaResponse = response.json().await?;
        debug!(
            chars = ollama_response.response.len(),
            "Ollama completion received"
        );

        Ok(ollama_response.response)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let oracle = OllamaOracle::new("http://localhost:11434/", "llama3.2");
        assert_eq!(oracle.host(), "http://localhost:11434");
    }

    #[test]
    fn test_with_model() {
        let oracle = OllamaOracle::new("http://localhost:11434", "llama3.2");
        let swapped = oracle.with_model("gemma3");
        assert_eq!(swapped.model(), "gemma3");
        assert_eq!(oracle.model(), "llama3.2");
    }
}
