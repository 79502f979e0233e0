use thiserror::Error;

/// Top-level error type for the Companion client.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for CompanionError` so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompanionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Voice error: {0}")]
    Voice(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for CompanionError {
    fn from(err: toml::de::Error) -> Self {
        CompanionError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CompanionError {
    fn from(err: toml::ser::Error) -> Self {
        CompanionError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CompanionError {
    fn from(err: serde_json::Error) -> Self {
        CompanionError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Companion operations.
pub type Result<T> = std::result::Result<T, CompanionError>;
