use thiserror::Error;

/// Top-level error type for Campus.
#[derive(Debug, Error)]
pub enum CampusError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Preference store error.
    #[error("store error: {0}")]
    Store(String),

    /// HTTP client construction or transport setup error.
    #[error("http error: {0}")]
    Http(String),

    /// Unsupported or malformed locale tag.
    #[error("unsupported locale: {0}")]
    Locale(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
