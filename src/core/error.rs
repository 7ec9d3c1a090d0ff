//! Error types for the test-grader library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using test-grader's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while grading test files.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Unsupported language for the given file.
    #[error("Unsupported language for file: {path}")]
    UnsupportedLanguage { path: PathBuf },

    /// Parser setup or parse failure.
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Average score below the requested minimum.
    #[error("{message}")]
    ThresholdViolation {
        message: String,
        score: f64,
        minimum: u32,
    },
}

impl Error {
    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a threshold violation error.
    pub fn threshold_violation(score: f64, minimum: u32) -> Self {
        Self::ThresholdViolation {
            message: format!(
                "Average score {} below minimum {}",
                score.trunc() as i64,
                minimum
            ),
            score,
            minimum,
        }
    }
}
