//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values like `OPENROUTER_API_KEY`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use crate::analysis::DetectorConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        // API key comes from the environment only, never from the config file.
        config.oracle.api_key = std::env::var("OPENROUTER_API_KEY").ok();

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.feed.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "feed.api_url" }.into());
        }
        if self.feed.max_concurrent_books == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.max_concurrent_books",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

/// Market feed (Polymarket CLOB REST) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the CLOB API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Bound on concurrent order book fetches.
    #[serde(default = "default_max_concurrent_books")]
    pub max_concurrent_books: usize,
}

fn default_api_url() -> String {
    "https://clob.polymarket.com".into()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_concurrent_books() -> usize {
    8
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            max_concurrent_books: default_max_concurrent_books(),
        }
    }
}

/// Relationship oracle (OpenAI-compatible chat API) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// Whether to query the oracle during an analysis run.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_oracle_base_url")]
    pub base_url: String,
    #[serde(default = "default_oracle_model")]
    pub model: String,
    #[serde(default = "default_oracle_temperature")]
    pub temperature: f64,
    #[serde(default = "default_oracle_max_tokens")]
    pub max_tokens: usize,
    /// Loaded from `OPENROUTER_API_KEY`, never from the config file.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_oracle_base_url() -> String {
    "https://openrouter.ai/api/v1".into()
}

fn default_oracle_model() -> String {
    "anthropic/claude-3.7-sonnet".into()
}

fn default_oracle_temperature() -> f64 {
    0.1
}

fn default_oracle_max_tokens() -> usize {
    4096
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_oracle_base_url(),
            model: default_oracle_model(),
            temperature: default_oracle_temperature(),
            max_tokens: default_oracle_max_tokens(),
            api_key: None,
        }
    }
}

/// Output locations for persisted documents.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory for market snapshot documents.
    #[serde(default = "default_markets_dir")]
    pub markets_dir: PathBuf,
    /// Directory for analysis documents.
    #[serde(default = "default_analysis_dir")]
    pub analysis_dir: PathBuf,
    /// Filename prefix for snapshot documents.
    #[serde(default = "default_snapshot_prefix")]
    pub snapshot_prefix: String,
}

fn default_markets_dir() -> PathBuf {
    PathBuf::from("data/markets")
}

fn default_analysis_dir() -> PathBuf {
    PathBuf::from("data/analysis")
}

fn default_snapshot_prefix() -> String {
    "polymarket_markets".into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            markets_dir: default_markets_dir(),
            analysis_dir: default_analysis_dir(),
            snapshot_prefix: default_snapshot_prefix(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `"pretty"` or `"json"`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.feed.api_url, "https://clob.polymarket.com");
        assert_eq!(config.feed.max_concurrent_books, 8);
        assert_eq!(config.detector.min_profit_threshold, dec!(0.02));
        assert_eq!(config.detector.transaction_fee, dec!(0.02));
        assert_eq!(config.detector.position_size, dec!(100));
        assert!(!config.oracle.enabled);
    }

    #[test]
    fn parses_overrides() {
        let config: Config = toml::from_str(
            r#"
            [feed]
            api_url = "http://localhost:9000"
            max_concurrent_books = 2

            [detector]
            min_profit_threshold = "0.05"
            position_size = "250"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.feed.api_url, "http://localhost:9000");
        assert_eq!(config.detector.min_profit_threshold, dec!(0.05));
        assert_eq!(config.detector.position_size, dec!(250));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn partial_logging_section_keeps_field_defaults() {
        let config: Config = toml::from_str(
            r#"
            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let config: Config = toml::from_str(
            r#"
            [feed]
            max_concurrent_books = 0
            "#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }
}
