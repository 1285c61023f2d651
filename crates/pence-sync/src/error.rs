use pence_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<SyncError> for CoreError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Http(inner) if inner.is_decode() => {
                CoreError::MalformedResponse(inner.to_string())
            }
            SyncError::Http(inner) => CoreError::Transport(inner.to_string()),
            SyncError::Status(code) => CoreError::Transport(format!("status {code}")),
            SyncError::MalformedResponse(message) => CoreError::MalformedResponse(message),
        }
    }
}
