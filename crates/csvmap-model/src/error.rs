use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid profile: {reason}")]
    InvalidProfile { reason: String },
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
    #[error("unknown converter kind: {0}")]
    UnknownConverterKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
