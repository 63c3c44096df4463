//! Error types for source data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a source file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source file does not exist.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the source file (including invalid UTF-8).
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file has zero lines, not even a header.
    #[error("source file is empty: {path}")]
    EmptySource { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
