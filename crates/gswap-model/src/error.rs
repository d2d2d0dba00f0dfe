use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown similarity algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("invalid GUID '{0}': expected 32 hex digits")]
    InvalidGuid(String),
    #[error("threshold must be a finite, non-negative number (got {0})")]
    InvalidThreshold(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
