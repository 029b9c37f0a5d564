use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors fetching market data from the feed.
///
/// Inside the pricing path these are always resolved locally to a
/// conservative worst-case estimate and never propagate out of a run.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from feed: {0}")]
    Malformed(String),
}

/// Errors talking to the relationship oracle.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("oracle returned no completion")]
    EmptyResponse,

    #[error("failed to parse oracle response: {0}")]
    Parse(String),
}

/// Errors writing results to the persistence sink.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to write output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
