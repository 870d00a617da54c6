use thiserror::Error;

/// Main error type for the movie engine
#[derive(Error, Debug)]
pub enum MovieEngineError {
    /// Malformed ranking input (candidates not a sequence, bad element shape)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem errors (config, short film catalog)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider errors
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    /// Requested record does not exist upstream
    #[error("Not found: {0}")]
    NotFound(String),
}

impl MovieEngineError {
    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        MovieEngineError::Provider {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

impl From<serde_yaml::Error> for MovieEngineError {
    fn from(e: serde_yaml::Error) -> Self {
        MovieEngineError::Config(e.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MovieEngineError>;
