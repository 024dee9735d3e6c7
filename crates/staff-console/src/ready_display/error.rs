use thiserror::Error;

/// Errors surfaced by the ready display.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The controller was disposed. Late poll results and queries see this and drop it.
    #[error("Ready display disposed")]
    Disposed,
    #[error("Unexpected reply from the ready display: {0}")]
    UnexpectedReply(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
