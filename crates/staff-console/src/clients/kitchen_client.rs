//! # Kitchen Client
//!
//! High-level API for the kitchen-board actor, plus the status-change round trip to the
//! backend.
use crate::api::ApiClient;
use crate::kitchen_board::{KitchenBoard, KitchenError, KitchenReply, KitchenRequest, KitchenTab, KitchenView};
use crate::model::{KitchenOrder, OrderId, OrderStatus};
use crate::polling::{PollOutcome, PollSink};
use actor_framework::{ActorClient, ActorHandle, FrameworkError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct KitchenClient {
    inner: ActorHandle<KitchenBoard>,
}

impl KitchenClient {
    pub fn new(inner: ActorHandle<KitchenBoard>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<KitchenBoard> for KitchenClient {
    type Error = KitchenError;

    fn inner(&self) -> &ActorHandle<KitchenBoard> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if e.is_closed() {
            return KitchenError::Disposed;
        }
        // Board rejections carry only Copy data, so they can be rebuilt from the box.
        match e.downcast_behavior::<KitchenError>() {
            Some(KitchenError::NotFound(id)) => KitchenError::NotFound(*id),
            Some(KitchenError::InvalidTransition { order_id, from, to }) => {
                KitchenError::InvalidTransition {
                    order_id: *order_id,
                    from: *from,
                    to: *to,
                }
            }
            _ => KitchenError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl KitchenClient {
    async fn request(&self, request: KitchenRequest) -> Result<KitchenReply, KitchenError> {
        self.inner.call(request).await.map_err(Self::map_error)
    }

    async fn poll_call(&self, request: KitchenRequest) -> Result<PollOutcome, KitchenError> {
        match self.request(request).await? {
            KitchenReply::Poll(outcome) => Ok(outcome),
            other => Err(KitchenError::UnexpectedReply(format!("{other:?}"))),
        }
    }

    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub async fn replace(&self, seq: u64, orders: Vec<KitchenOrder>) -> Result<PollOutcome, KitchenError> {
        self.poll_call(KitchenRequest::Replace { seq, orders }).await
    }

    #[instrument(skip(self))]
    pub async fn poll_failed(&self, seq: u64, message: String) -> Result<PollOutcome, KitchenError> {
        self.poll_call(KitchenRequest::PollFailed { seq, message }).await
    }

    pub async fn view(&self, tab: KitchenTab) -> Result<KitchenView, KitchenError> {
        match self.request(KitchenRequest::View(tab)).await? {
            KitchenReply::View(view) => Ok(view),
            other => Err(KitchenError::UnexpectedReply(format!("{other:?}"))),
        }
    }

    /// Moves an order to `status`.
    ///
    /// The board must currently offer that transition. The backend is asked next, and
    /// only once it accepts is the board updated, so a rejected change leaves the board
    /// untouched until the next poll.
    #[instrument(skip(self, api))]
    pub async fn set_status(
        &self,
        api: &ApiClient,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), KitchenError> {
        let from = match self
            .request(KitchenRequest::CheckTransition { order_id, status })
            .await?
        {
            KitchenReply::Allowed(current) => current,
            other => return Err(KitchenError::UnexpectedReply(format!("{other:?}"))),
        };

        api.update_order_status(order_id, status).await?;

        match self
            .request(KitchenRequest::MarkStatus { order_id, status })
            .await?
        {
            KitchenReply::Marked => {
                info!(%order_id, %from, to = %status, "Order moved");
                Ok(())
            }
            other => Err(KitchenError::UnexpectedReply(format!("{other:?}"))),
        }
    }
}

#[async_trait]
impl PollSink<Vec<KitchenOrder>> for KitchenClient {
    async fn apply(&self, seq: u64, orders: Vec<KitchenOrder>) {
        match self.replace(seq, orders).await {
            Ok(_) => {}
            Err(KitchenError::Disposed) => debug!(seq, "Poll result arrived after disposal"),
            Err(e) => tracing::error!(seq, error = %e, "Poll result not applied"),
        }
    }

    async fn fail(&self, seq: u64, message: String) {
        match self.poll_failed(seq, message).await {
            Ok(_) => {}
            Err(KitchenError::Disposed) => debug!(seq, "Poll failure arrived after disposal"),
            Err(e) => tracing::error!(seq, error = %e, "Poll failure not recorded"),
        }
    }
}
