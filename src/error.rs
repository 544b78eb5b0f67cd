//! Error types shared by the store, import/export and configuration.
use crate::models::CardValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid card: {0}")]
    Validation(#[from] CardValidationError),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown storage backend `{0}` (expected `json` or `sqlite`)")]
    UnknownBackend(String),
}
