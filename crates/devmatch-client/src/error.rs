use thiserror::Error;

/// Client-side error taxonomy. Every failure here scopes to a single user
/// action; nothing is fatal to the process.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure reaching the backend.
    #[error("backend unreachable: {0}")]
    BackendUnavailable(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("request rejected by backend ({status})")]
    RequestRejected { status: reqwest::StatusCode },

    /// Local session store read/write failure.
    #[error("session store failure: {0}")]
    Persistence(anyhow::Error),

    /// Push channel connection failure.
    #[error("match channel connection failed: {0}")]
    Gateway(#[from] tokio_tungstenite::tungstenite::Error),

    /// The push channel connect did not complete within its bound.
    #[error("match channel connect timed out")]
    ConnectTimeout,

    /// Blank username rejected before hitting the backend.
    #[error("username must not be empty")]
    EmptyUsername,
}

impl ClientError {
    /// Errors the login screen surfaces as "try again" rather than bugs.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::BackendUnavailable(_) | Self::RequestRejected { .. } | Self::ConnectTimeout
        )
    }
}
