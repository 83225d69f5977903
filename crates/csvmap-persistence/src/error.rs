//! Persistence error types.
//!
//! Every error carries a user-facing message and, where one exists, a hint
//! on how to fix it.

use std::path::PathBuf;

use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === File access ===
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file could not be renamed over the target.
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Content ===
    /// File is not a store or profile document.
    #[error("Invalid file format: {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("Failed to serialize profile data")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Profile document is missing required content.
    #[error(transparent)]
    InvalidProfile(#[from] csvmap_model::ModelError),

    // === Lookup ===
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("No profile is currently loaded")]
    NoCurrentProfile,
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the file at {}", operation, path.display()),
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save the file to {}. Please check disk space and permissions.",
                target_path.display()
            ),
            Self::InvalidFormat { path, reason } => format!(
                "The file at {} is not a valid profile file: {}",
                path.display(),
                reason
            ),
            Self::Serialization { .. } => {
                "An error occurred while saving the profile data.".to_string()
            }
            Self::Deserialization { path, .. } => format!(
                "The file at {} could not be read. It may be corrupted.",
                path.display()
            ),
            Self::InvalidProfile(error) => format!("The profile could not be used: {error}"),
            Self::ProfileNotFound(id) => format!("No profile with id or name '{id}' exists."),
            Self::NoCurrentProfile => "No profile is loaded, so there is nothing to update.".into(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
            Self::InvalidFormat { .. } | Self::InvalidProfile(_) => Some(
                "A profile file needs name, sourceColumns, targetColumns and mappings.".into(),
            ),
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } => {
                Some("Restore the file from a backup or export the profiles again.".into())
            }
            Self::ProfileNotFound(_) => Some("Run `csv-mapper profile list` to see ids.".into()),
            Self::NoCurrentProfile => Some("Load or save a profile first.".into()),
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
