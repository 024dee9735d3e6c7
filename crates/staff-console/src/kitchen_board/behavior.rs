use super::board::{Board, KitchenTab, KitchenView};
use super::error::KitchenError;
use crate::model::{KitchenOrder, OrderId, OrderStatus};
use crate::polling::PollOutcome;
use actor_framework::{ActorBehavior, Timers};
use async_trait::async_trait;
use chrono::Local;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum KitchenRequest {
    Replace { seq: u64, orders: Vec<KitchenOrder> },
    PollFailed { seq: u64, message: String },
    View(KitchenTab),
    /// Validates a status change before it is sent to the backend.
    CheckTransition { order_id: OrderId, status: OrderStatus },
    /// Records a status change the backend accepted.
    MarkStatus { order_id: OrderId, status: OrderStatus },
}

#[derive(Debug)]
pub enum KitchenReply {
    Poll(PollOutcome),
    View(KitchenView),
    /// Current status of the order, when a transition is allowed.
    Allowed(OrderStatus),
    Marked,
}

/// Actor behaviour around [`Board`]. It schedules no timers.
#[derive(Debug, Default)]
pub struct KitchenBoard {
    board: Board,
}

#[async_trait]
impl ActorBehavior for KitchenBoard {
    type Request = KitchenRequest;
    type Reply = KitchenReply;
    type TimerKey = OrderId;
    type Context = ();
    type Error = KitchenError;

    async fn handle(
        &mut self,
        request: KitchenRequest,
        _ctx: &(),
        _timers: &mut Timers<OrderId>,
    ) -> Result<KitchenReply, KitchenError> {
        match request {
            KitchenRequest::Replace { seq, orders } => {
                let count = orders.len();
                let outcome = self.board.replace(seq, orders, Local::now());
                debug!(seq, count, ?outcome, "Kitchen poll");
                Ok(KitchenReply::Poll(outcome))
            }
            KitchenRequest::PollFailed { seq, message } => {
                warn!(seq, error = %message, "Kitchen poll failed");
                Ok(KitchenReply::Poll(self.board.fail(seq, message)))
            }
            KitchenRequest::View(tab) => Ok(KitchenReply::View(self.board.view(tab))),
            KitchenRequest::CheckTransition { order_id, status } => self
                .board
                .check_transition(order_id, status)
                .map(KitchenReply::Allowed),
            KitchenRequest::MarkStatus { order_id, status } => {
                self.board.mark_status(order_id, status)?;
                info!(order_id = %order_id, %status, "Status updated");
                Ok(KitchenReply::Marked)
            }
        }
    }
}
