//! Kitchen board state and the pure helpers behind the KDS screen.
use super::error::KitchenError;
use crate::model::{KitchenOrder, OrderId, OrderStatus};
use crate::polling::PollOutcome;
use chrono::{DateTime, Local, NaiveDateTime};

/// The two tabs of the kitchen screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum KitchenTab {
    /// Pending and processing orders.
    #[default]
    InProgress,
    /// Ready and completed orders.
    Completed,
}

impl KitchenTab {
    pub fn includes(self, status: OrderStatus) -> bool {
        match self {
            KitchenTab::InProgress => {
                matches!(status, OrderStatus::Pending | OrderStatus::Processing)
            }
            KitchenTab::Completed => matches!(status, OrderStatus::Ready | OrderStatus::Completed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub processing: usize,
    pub ready: usize,
    pub completed: usize,
}

/// One frame of the kitchen screen.
#[derive(Debug, Clone, PartialEq)]
pub struct KitchenView {
    pub tab: KitchenTab,
    /// Orders of `tab`, oldest first.
    pub orders: Vec<KitchenOrder>,
    pub counts: StatusCounts,
    pub last_refreshed: Option<DateTime<Local>>,
    pub error: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Default)]
pub struct Board {
    orders: Vec<KitchenOrder>,
    last_refreshed: Option<DateTime<Local>>,
    error: Option<String>,
    last_seq: Option<u64>,
    loaded: bool,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    fn accept(&mut self, seq: u64) -> bool {
        if self.last_seq.is_some_and(|last| seq <= last) {
            return false;
        }
        self.last_seq = Some(seq);
        self.loaded = true;
        true
    }

    /// Replaces the board with poll number `seq`, sorted oldest first.
    pub fn replace(
        &mut self,
        seq: u64,
        mut orders: Vec<KitchenOrder>,
        now: DateTime<Local>,
    ) -> PollOutcome {
        if !self.accept(seq) {
            return PollOutcome::Stale;
        }
        // Unparseable timestamps sort last; the sort is stable for equal times.
        orders.sort_by_key(|o| {
            let at = parse_timestamp(&o.order_date_time);
            (at.is_none(), at)
        });
        self.orders = orders;
        self.last_refreshed = Some(now);
        self.error = None;
        PollOutcome::Applied
    }

    /// Flags poll number `seq` as failed. The orders on the board stay as they are.
    pub fn fail(&mut self, seq: u64, message: String) -> PollOutcome {
        if !self.accept(seq) {
            return PollOutcome::Stale;
        }
        self.error = Some(message);
        PollOutcome::Applied
    }

    pub fn view(&self, tab: KitchenTab) -> KitchenView {
        let mut counts = StatusCounts::default();
        for order in &self.orders {
            match order.order_status {
                OrderStatus::Pending => counts.pending += 1,
                OrderStatus::Processing => counts.processing += 1,
                OrderStatus::Ready => counts.ready += 1,
                OrderStatus::Completed => counts.completed += 1,
                OrderStatus::Canceled | OrderStatus::Unknown => {}
            }
        }
        KitchenView {
            tab,
            orders: self
                .orders
                .iter()
                .filter(|o| tab.includes(o.order_status))
                .cloned()
                .collect(),
            counts,
            last_refreshed: self.last_refreshed,
            error: self.error.clone(),
            loading: !self.loaded,
        }
    }

    fn find(&self, order_id: OrderId) -> Result<&KitchenOrder, KitchenError> {
        self.orders
            .iter()
            .find(|o| o.order_id == order_id)
            .ok_or(KitchenError::NotFound(order_id))
    }

    /// Checks that the board offers `next` for `order_id`, returning the current status.
    pub fn check_transition(
        &self,
        order_id: OrderId,
        next: OrderStatus,
    ) -> Result<OrderStatus, KitchenError> {
        let current = self.find(order_id)?.order_status;
        if !current.can_transition_to(next) {
            return Err(KitchenError::InvalidTransition {
                order_id,
                from: current,
                to: next,
            });
        }
        Ok(current)
    }

    /// Applies a status the backend already accepted.
    pub fn mark_status(&mut self, order_id: OrderId, status: OrderStatus) -> Result<(), KitchenError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or(KitchenError::NotFound(order_id))?;
        order.order_status = status;
        Ok(())
    }
}

/// Parses a backend timestamp. Naive timestamps are taken as local time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// How long ago an order was placed: "Just now", "1 minute ago", "N hours ago"...
pub fn time_since(order_date_time: &str, now: NaiveDateTime) -> String {
    let Some(placed) = parse_timestamp(order_date_time) else {
        return String::new();
    };
    let minutes = (now - placed).num_minutes();
    match minutes {
        m if m < 1 => "Just now".to_string(),
        1 => "1 minute ago".to_string(),
        m if m < 60 => format!("{m} minutes ago"),
        m => match m / 60 {
            1 => "1 hour ago".to_string(),
            h => format!("{h} hours ago"),
        },
    }
}
