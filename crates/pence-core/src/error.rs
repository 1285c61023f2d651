use std::result::Result as StdResult;

use pence_domain::FormatError;
use thiserror::Error;

/// Unified error type for the cache and reconciliation layers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Overview data not loaded")]
    NotLoaded,
    #[error("No item at position {0}")]
    ItemNotFound(usize),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, CoreError>;

impl From<FormatError> for CoreError {
    fn from(err: FormatError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
