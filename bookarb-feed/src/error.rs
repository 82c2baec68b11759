use std::time::Duration;

use thiserror::Error;

/// Failure to obtain an odds snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        message: String,
        retry_after: Option<Duration>,
    },

    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
impl FetchError {
    /// Whether a retry could succeed. Client errors and malformed payloads would fail again.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => matches!(status, 408 | 425 | 429 | 500..=599),
            FetchError::Transport(err) => match err.status() {
                Some(status) => matches!(status.as_u16(), 408 | 425 | 429 | 500..=599),
                None => !err.is_builder() && !err.is_decode(),
            },
            FetchError::Decode(_) | FetchError::Join(_) => false,
        }
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            FetchError::Status { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
