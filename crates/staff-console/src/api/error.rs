use crate::session::SessionError;
use thiserror::Error;

/// Failures talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP: {0}")]
    Transport(#[from] reqwest::Error),

    /// A non-2xx answer. `message` is the body's `message` field, or the status text.
    #[error("{status}: {message}")]
    Status { status: u16, message: String },

    /// The backend rejected the bearer token (or there was none).
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    BaseUrl(String),

    /// The call went through but the session file could not be updated.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Status code of a non-2xx answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthenticated => Some(401),
            _ => None,
        }
    }
}
