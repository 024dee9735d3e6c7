use crate::api::ApiError;
use crate::model::{OrderId, OrderStatus};
use thiserror::Error;

/// Errors for the kitchen board.
#[derive(Debug, Error)]
pub enum KitchenError {
    #[error("Order {0} is not on the kitchen board")]
    NotFound(OrderId),
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
    #[error("Backend rejected the status change: {0}")]
    Api(#[from] ApiError),
    #[error("Kitchen board disposed")]
    Disposed,
    #[error("Unexpected reply from the kitchen board: {0}")]
    UnexpectedReply(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
