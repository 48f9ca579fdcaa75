use thiserror::Error;

/// stockheat error types
#[derive(Error, Debug)]
pub enum StockheatError {
    /// HTTP request to the price backend failed
    #[error("http error: {0}")]
    Http(String),

    /// Failed to parse a JSON payload
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Price cache operation failed
    #[error("cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for stockheat
pub type Result<T> = std::result::Result<T, StockheatError>;
