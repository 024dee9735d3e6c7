use super::error::DisplayError;
use super::rotation::{format_remaining, Rotation};
use crate::model::{OrderId, ReadyOrder};
use crate::polling::PollOutcome;
use actor_framework::{ActorBehavior, Timers};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Messages accepted by the ready display.
#[derive(Debug)]
pub enum DisplayRequest {
    /// Result of poll number `seq`.
    ApplyPoll { seq: u64, orders: Vec<ReadyOrder> },
    /// Poll number `seq` failed.
    PollFailed { seq: u64, message: String },
    Snapshot,
}

#[derive(Debug)]
pub enum DisplayReply {
    Poll(PollOutcome),
    Snapshot(ReadySnapshot),
}

/// An order on screen, as rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedOrder {
    pub order: ReadyOrder,
    pub remaining: Duration,
}

impl DisplayedOrder {
    /// `m:ss` countdown.
    pub fn countdown(&self) -> String {
        format_remaining(self.remaining)
    }
}

/// Everything the Ready screen needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadySnapshot {
    pub displayed: Vec<DisplayedOrder>,
    pub queued_count: usize,
    /// Orders that were shown and timed out, ascending.
    pub shown: Vec<OrderId>,
    /// Message of the latest poll if it failed.
    pub error: Option<String>,
    /// True until the first poll result (success or failure) arrives.
    pub loading: bool,
}

impl ReadySnapshot {
    pub fn displayed_ids(&self) -> Vec<OrderId> {
        self.displayed.iter().map(|d| d.order.order_id).collect()
    }
}

/// The Ready-display rotation controller.
///
/// Poll results arrive as requests; dwell expiries arrive as timers keyed by order id.
/// Both run on the actor loop, so neither ever observes the other half-applied.
#[derive(Debug)]
pub struct ReadyRotation {
    rotation: Rotation,
    last_seq: Option<u64>,
    error: Option<String>,
    loading: bool,
}

impl ReadyRotation {
    pub fn new(slots: usize, dwell: Duration) -> Self {
        Self {
            rotation: Rotation::new(slots, dwell),
            last_seq: None,
            error: None,
            loading: true,
        }
    }

    /// Records `seq` if it is newer than anything seen so far.
    fn accept(&mut self, seq: u64) -> bool {
        if self.last_seq.is_some_and(|last| seq <= last) {
            return false;
        }
        self.last_seq = Some(seq);
        self.loading = false;
        true
    }

    fn start_dwell(&self, timers: &mut Timers<OrderId>, promoted: Vec<OrderId>) {
        for id in promoted {
            let result = timers.schedule(id, self.rotation.dwell());
            debug_assert!(result.is_ok(), "order {id} already has a dwell timer");
            match result {
                Ok(_) => info!(order_id = %id, "Promoted"),
                Err(e) => warn!(order_id = %id, error = %e, "Dwell timer not restarted"),
            }
        }
    }

    fn snapshot(&self) -> ReadySnapshot {
        let now = Instant::now();
        ReadySnapshot {
            displayed: self
                .rotation
                .displayed()
                .iter()
                .map(|entry| DisplayedOrder {
                    order: entry.order.clone(),
                    remaining: self.rotation.remaining(entry, now),
                })
                .collect(),
            queued_count: self.rotation.queued_count(),
            shown: self.rotation.shown().collect(),
            error: self.error.clone(),
            loading: self.loading,
        }
    }
}

#[async_trait]
impl ActorBehavior for ReadyRotation {
    type Request = DisplayRequest;
    type Reply = DisplayReply;
    type TimerKey = OrderId;
    type Context = ();
    type Error = DisplayError;

    async fn handle(
        &mut self,
        request: DisplayRequest,
        _ctx: &(),
        timers: &mut Timers<OrderId>,
    ) -> Result<DisplayReply, DisplayError> {
        match request {
            DisplayRequest::ApplyPoll { seq, orders } => {
                if !self.accept(seq) {
                    debug!(seq, "Stale poll ignored");
                    return Ok(DisplayReply::Poll(PollOutcome::Stale));
                }
                self.error = None;
                let promoted = self.rotation.apply_poll(orders, Instant::now());
                self.start_dwell(timers, promoted);
                Ok(DisplayReply::Poll(PollOutcome::Applied))
            }
            DisplayRequest::PollFailed { seq, message } => {
                if !self.accept(seq) {
                    debug!(seq, "Stale poll failure ignored");
                    return Ok(DisplayReply::Poll(PollOutcome::Stale));
                }
                warn!(seq, error = %message, "Ready poll failed");
                self.error = Some(message);
                Ok(DisplayReply::Poll(PollOutcome::Applied))
            }
            DisplayRequest::Snapshot => Ok(DisplayReply::Snapshot(self.snapshot())),
        }
    }

    async fn on_timer(&mut self, key: OrderId, _ctx: &(), timers: &mut Timers<OrderId>) {
        match self.rotation.expire(key, Instant::now()) {
            Some(promoted) => {
                info!(order_id = %key, shown_for_secs = self.rotation.dwell().as_secs(), "Exhausted");
                self.start_dwell(timers, promoted);
            }
            None => warn!(order_id = %key, "Dwell timer fired for an order not on display"),
        }
    }

    async fn on_stop(&mut self, _ctx: &()) {
        info!(
            displayed = self.rotation.displayed().len(),
            queued = self.rotation.queued_count(),
            "Ready display disposed"
        );
    }
}
