//! Engine configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. TOML file in the platform data dir (~/.local/share/foresight/config.toml)
//! 2. Environment variable overrides (OLLAMA_HOST, OLLAMA_MODEL,
//!    FORESIGHT_LOOKBACK_DAYS, FORESIGHT_ORACLE_TIMEOUT_SECS)
//!
//! A missing or malformed file degrades to defaults with a warning; config
//! problems never abort a forecast.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::ai::{OllamaOracle, OracleClient};

/// Default analysis lookback: roughly six months
pub const DEFAULT_LOOKBACK_DAYS: i64 = 183;

const DEFAULT_MODEL: &str = "llama3.2";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ollama server URL; no oracle is configured when absent
    pub oracle_host: Option<String>,
    /// Model name passed on every generate call
    pub oracle_model: String,
    /// Per-call oracle timeout
    pub oracle_timeout_secs: u64,
    /// How far back the transaction fetch reaches
    pub lookback_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            oracle_host: None,
            oracle_model: DEFAULT_MODEL.to_string(),
            oracle_timeout_secs: DEFAULT_TIMEOUT_SECS,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl EngineConfig {
    /// Load config from the data-dir file, then apply env overrides
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .map(|raw| Self::from_toml(&raw))
            .unwrap_or_default();
        config.apply_env();
        config
    }

    /// Parse a TOML config document, falling back to defaults on error
    pub fn from_toml(raw: &str) -> Self {
        match toml::from_str(raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Malformed config file, using defaults");
                Self::default()
            }
        }
    }

    /// Platform config file location
    pub fn config_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("foresight").join("config.toml"))
    }

    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("OLLAMA_HOST") {
            self.oracle_host = Some(host);
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            self.oracle_model = model;
        }
        if let Ok(days) = std::env::var("FORESIGHT_LOOKBACK_DAYS") {
            match days.parse() {
                Ok(days) => self.lookback_days = days,
                Err(_) => warn!(value = %days, "Ignoring bad FORESIGHT_LOOKBACK_DAYS"),
            }
        }
        if let Ok(secs) = std::env::var("FORESIGHT_ORACLE_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.oracle_timeout_secs = secs,
                Err(_) => warn!(value = %secs, "Ignoring bad FORESIGHT_ORACLE_TIMEOUT_SECS"),
            }
        }
    }

    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Build the oracle client this config describes, if any
    pub fn oracle(&self) -> Option<OracleClient> {
        self.oracle_host.as_ref().map(|host| {
            OracleClient::Ollama(
                OllamaOracle::new(host, &self.oracle_model).with_timeout(self.oracle_timeout()),
            )
        })
    }
}
