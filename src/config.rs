//! Configuration management for the enrichment run.
//!
//! Configuration can be set via environment variables:
//! - `OPENROUTER_API_KEY` - Required. Your OpenRouter API key.
//! - `ENRICH_MODEL` - Optional. Model used for research conversations. Defaults to `openai/gpt-4o-mini`.
//! - `CATALOG_PATH` - Optional. Input catalog file. Defaults to `model_reference/model_reference.json`.
//! - `SNAPSHOT_PATH` - Optional. Output catalog file. Defaults to `model_reference/enhanced_model_reference.json`.
//! - `MAX_TURNS` - Optional. Model-call bound per research task. Defaults to `10`.
//! - `ENTRY_DELAY_SECS` - Optional. Pause between catalog entries. Defaults to `2`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Enrichment run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter API key
    pub api_key: String,

    /// Model identifier used for research conversations (OpenRouter format)
    pub model: String,

    /// Input catalog file
    pub catalog_path: PathBuf,

    /// Output catalog file
    pub snapshot_path: PathBuf,

    /// Maximum model calls per research task
    pub max_turns: usize,

    /// Pause between catalog entries, to stay under provider rate limits
    pub entry_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENROUTER_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let model = std::env::var("ENRICH_MODEL")
            .unwrap_or_else(|_| "openai/gpt-4o-mini".to_string());

        let catalog_path = std::env::var("CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("model_reference/model_reference.json"));

        let snapshot_path = std::env::var("SNAPSHOT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("model_reference/enhanced_model_reference.json"));

        let max_turns = std::env::var("MAX_TURNS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_TURNS".to_string(), format!("{}", e)))?;

        let entry_delay_secs: u64 = std::env::var("ENTRY_DELAY_SECS")
            .unwrap_or_else(|_| "2".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("ENTRY_DELAY_SECS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            api_key,
            model,
            catalog_path,
            snapshot_path,
            max_turns,
            entry_delay: Duration::from_secs(entry_delay_secs),
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            catalog_path: PathBuf::from("model_reference/model_reference.json"),
            snapshot_path: PathBuf::from("model_reference/enhanced_model_reference.json"),
            max_turns: 10,
            entry_delay: Duration::from_secs(2),
        }
    }
}
