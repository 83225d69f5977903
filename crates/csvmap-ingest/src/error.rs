//! Error types for CSV import and export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing tabular files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// The input has no header row.
    #[error("CSV input has no header row")]
    MissingHeader,

    /// Malformed CSV input.
    #[error("failed to parse CSV: {0}")]
    CsvParse(#[source] csv::Error),

    /// Failed to serialize rows.
    #[error("failed to write CSV: {0}")]
    CsvWrite(#[source] csv::Error),

    /// Serialized output was not valid UTF-8.
    #[error("CSV output is not valid UTF-8")]
    InvalidOutput,
}

pub type Result<T> = std::result::Result<T, IngestError>;
