//! Error types for Prosno.

use thiserror::Error;

/// Library-level error type for Prosno operations.
#[derive(Error, Debug)]
pub enum ProsnoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector index error: {0}")]
    VectorIndex(String),

    #[error("MCQ generation failed: {0}")]
    Generation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Prosno operations.
pub type Result<T> = std::result::Result<T, ProsnoError>;
