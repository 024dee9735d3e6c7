//! Orders as reported by `GET /api/orders/kds`.
use super::ready::{label, OrderId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Lifecycle status of an order in the kitchen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Ready,
    Completed,
    Canceled,
    /// Any status this console does not know about. Shown in neither tab.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Whether the board offers a button moving an order from `self` to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Canceled)
                | (Processing, Ready)
                | (Processing, Pending)
                | (Processing, Canceled)
                | (Ready, Completed)
                | (Ready, Processing)
                | (Completed, Ready)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Unknown => "unknown",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "ready" => Ok(OrderStatus::Ready),
            "completed" => Ok(OrderStatus::Completed),
            "canceled" | "cancelled" => Ok(OrderStatus::Canceled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// One line of a kitchen ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenItem {
    pub menu_item_name: String,
    pub quantity: u32,
    /// Ingredient ids the customer asked to leave out.
    #[serde(default)]
    pub excluded_ingredients: Vec<u64>,
}

/// A kitchen ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenOrder {
    pub order_id: OrderId,
    #[serde(default, deserialize_with = "label")]
    pub table_number: Option<String>,
    /// `dine-in`, `takeaway` or `remote`.
    #[serde(default)]
    pub order_type: String,
    pub order_date_time: String,
    pub order_status: OrderStatus,
    #[serde(default)]
    pub items: Vec<KitchenItem>,
}
