//! Error types for the Tabula application

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the Tabula application
#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Line {line}: {source}")]
    Core {
        line: usize,
        #[source]
        source: tabula_core::CoreError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TabulaError>;
