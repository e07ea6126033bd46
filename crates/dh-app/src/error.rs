//! Error types for the dh-app service layer.

use std::path::PathBuf;

use dh_graph::GraphError;

/// Application error type shared by the command-line frontend and tests.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize: {0}")]
    Serialize(String),

    #[error("Unsupported file format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Configuration validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type for dh-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True when the error is a failed identifier lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Graph(GraphError::NotFound { .. }))
    }
}
