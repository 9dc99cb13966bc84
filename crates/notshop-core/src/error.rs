use thiserror::Error;

/// Top-level error type for notshop.
#[derive(Debug, Error)]
pub enum NotshopError {
    /// Malformed control item input (empty text, unrecognized record shape).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed build request or configuration.
    #[error("config error: {0}")]
    Config(String),

    /// An action token that this codec did not produce.
    #[error("decode error: {0}")]
    Decode(String),

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Translation files could not be loaded.
    #[error("locale error: {0}")]
    Locale(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
