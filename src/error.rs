//! Error types for the lexical kernel.

use thiserror::Error;

/// Errors surfaced by the kernel.
///
/// Scoring and segmentation never fail on ordinary input; these variants
/// cover bad configuration, broken internal records and config loading.
#[derive(Error, Debug)]
pub enum LexicaError {
    /// Invalid detector or engine configuration (e.g. weights not summing to 1.0)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A parsed record is internally inconsistent
    #[error("validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LexicaError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        LexicaError::Configuration(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        LexicaError::Validation(msg.into())
    }
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, LexicaError>;
