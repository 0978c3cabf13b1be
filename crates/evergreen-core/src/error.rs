//! Error types for Evergreen

use thiserror::Error;

/// The main error type for Evergreen operations
#[derive(Debug, Error)]
pub enum EvergreenError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Audio error: {0}")]
    AudioError(String),

    #[error("Wish error: {0}")]
    WishError(String),
}

/// Result type alias for Evergreen operations
pub type Result<T> = std::result::Result<T, EvergreenError>;

impl From<toml::de::Error> for EvergreenError {
    fn from(err: toml::de::Error) -> Self {
        EvergreenError::TomlParseError(err.to_string())
    }
}
