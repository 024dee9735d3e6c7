//! # Display Client
//!
//! High-level API for the ready-display actor. It is also the [`PollSink`] the ready
//! poller delivers to.
use crate::model::ReadyOrder;
use crate::polling::{PollOutcome, PollSink};
use crate::ready_display::{DisplayError, DisplayReply, DisplayRequest, ReadyRotation, ReadySnapshot};
use actor_framework::{ActorClient, ActorHandle, FrameworkError};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct DisplayClient {
    inner: ActorHandle<ReadyRotation>,
}

impl DisplayClient {
    pub fn new(inner: ActorHandle<ReadyRotation>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<ReadyRotation> for DisplayClient {
    type Error = DisplayError;

    fn inner(&self) -> &ActorHandle<ReadyRotation> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if e.is_closed() {
            DisplayError::Disposed
        } else {
            DisplayError::ActorCommunicationError(e.to_string())
        }
    }
}

impl DisplayClient {
    async fn poll_call(&self, request: DisplayRequest) -> Result<PollOutcome, DisplayError> {
        match self.inner.call(request).await.map_err(Self::map_error)? {
            DisplayReply::Poll(outcome) => Ok(outcome),
            other => Err(DisplayError::UnexpectedReply(format!("{other:?}"))),
        }
    }

    /// Delivers the result of poll number `seq`.
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub async fn on_poll(&self, seq: u64, orders: Vec<ReadyOrder>) -> Result<PollOutcome, DisplayError> {
        self.poll_call(DisplayRequest::ApplyPoll { seq, orders }).await
    }

    /// Reports that poll number `seq` failed. The displayed orders stay on screen.
    #[instrument(skip(self))]
    pub async fn poll_failed(&self, seq: u64, message: String) -> Result<PollOutcome, DisplayError> {
        self.poll_call(DisplayRequest::PollFailed { seq, message }).await
    }

    pub async fn snapshot(&self) -> Result<ReadySnapshot, DisplayError> {
        match self.inner.call(DisplayRequest::Snapshot).await.map_err(Self::map_error)? {
            DisplayReply::Snapshot(snapshot) => Ok(snapshot),
            other => Err(DisplayError::UnexpectedReply(format!("{other:?}"))),
        }
    }
}

#[async_trait]
impl PollSink<Vec<ReadyOrder>> for DisplayClient {
    async fn apply(&self, seq: u64, orders: Vec<ReadyOrder>) {
        match self.on_poll(seq, orders).await {
            Ok(_) => {}
            Err(DisplayError::Disposed) => debug!(seq, "Poll result arrived after disposal"),
            Err(e) => tracing::error!(seq, error = %e, "Poll result not applied"),
        }
    }

    async fn fail(&self, seq: u64, message: String) {
        match self.poll_failed(seq, message).await {
            Ok(_) => {}
            Err(DisplayError::Disposed) => debug!(seq, "Poll failure arrived after disposal"),
            Err(e) => tracing::error!(seq, error = %e, "Poll failure not recorded"),
        }
    }
}
