//! Converter degradation reasons.
//!
//! Converters never fail a run. Each one has an inner form that reports
//! *why* it could not produce a result; the caller substitutes
//! [`ConvertError::fallback`] and optionally records a diagnostic.

use thiserror::Error;

use crate::context::DiagnosticLevel;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConvertError {
    // === Split ===
    #[error("index {index} is outside {parts} part(s)")]
    IndexOutOfRange { index: i64, parts: usize },

    // === Conditional ===
    #[error("condition is missing {field}")]
    IncompleteCondition { field: &'static str },

    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // === Date format ===
    #[error("{which} date template is not set")]
    MissingTemplate { which: &'static str },

    #[error("value does not match template '{template}'")]
    TemplateMismatch { template: String },

    #[error("date {year:04}-{month:02} cannot be represented")]
    DateOutOfRange { year: i64, month: i64 },
}

impl ConvertError {
    /// Value the step produces instead of a result.
    ///
    /// Out-of-range indexes yield an empty string; every other reason keeps
    /// the incoming value.
    pub fn fallback(&self, original: &str) -> String {
        match self {
            Self::IndexOutOfRange { .. } => String::new(),
            _ => original.to_string(),
        }
    }

    /// Severity used when the degradation is recorded.
    pub fn level(&self) -> DiagnosticLevel {
        match self {
            Self::IndexOutOfRange { .. } | Self::TemplateMismatch { .. } => DiagnosticLevel::Info,
            Self::IncompleteCondition { .. }
            | Self::InvalidPattern { .. }
            | Self::MissingTemplate { .. }
            | Self::DateOutOfRange { .. } => DiagnosticLevel::Warning,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
