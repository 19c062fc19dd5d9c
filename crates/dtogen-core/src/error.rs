use thiserror::Error;

/// Core error type for dtogen operations.
#[derive(Error, Debug)]
pub enum DtogenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid type expression `{expr}`: {reason}")]
    InvalidTypeExpression { expr: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DtogenError {
    fn from(e: serde_json::Error) -> Self {
        DtogenError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for DtogenError {
    fn from(e: toml::de::Error) -> Self {
        DtogenError::Serialization(e.to_string())
    }
}

/// Result type alias using DtogenError.
pub type Result<T> = std::result::Result<T, DtogenError>;
