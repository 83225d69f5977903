//! Error types for mapping session operations.

use std::fmt;

/// Errors from mapping session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Target column id not found.
    TargetColumnNotFound(String),
    /// Mapping id not found.
    MappingNotFound(String),
    /// Column names must not be blank.
    EmptyColumnName,
    /// A move or edit addressed a position past the end of a list.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetColumnNotFound(id) => write!(f, "Target column not found: {id}"),
            Self::MappingNotFound(id) => write!(f, "Mapping not found: {id}"),
            Self::EmptyColumnName => write!(f, "Column name must not be empty"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Index {index} is out of range for {len} item(s)")
            }
        }
    }
}

impl std::error::Error for SessionError {}

pub type Result<T> = std::result::Result<T, SessionError>;
