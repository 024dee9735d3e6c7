//! Request and response bodies of the backend REST API.
//!
//! Response envelopes are private to the client; callers get the unwrapped lists.
use crate::model::{AttendanceRecord, KitchenOrder, OrderId, OrderStatus, ReadyOrder};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

// =============================================================================
// ORDERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ReadyOrdersEnvelope {
    #[serde(default)]
    pub ready_orders: Vec<ReadyOrder>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KitchenOrdersEnvelope {
    #[serde(default)]
    pub orders: Vec<KitchenOrder>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrdersEnvelope {
    #[serde(default)]
    pub orders: Vec<OrderSummary>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusUpdate {
    pub order_status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub table_number: serde_json::Value,
}

/// A row of the order list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    #[serde(default)]
    pub table: Option<TableRef>,
    pub order_date_time: String,
    #[serde(default)]
    pub order_type: String,
    /// Decimal string, exactly as the backend formats it.
    pub total_price: String,
    pub order_status: OrderStatus,
    pub payment_status: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One menu item on an order being placed or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: u64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_ingredients: Vec<u64>,
}

/// Body for creating or updating an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<u64>,
    pub order_type: String,
    pub items: Vec<OrderLine>,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// CATALOG
// =============================================================================

/// The four catalog resources edited from the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Tags,
    Ingredients,
    Categories,
    MenuItems,
}

impl CatalogKind {
    /// Path segment under `/api`, which doubles as the list envelope key.
    pub fn segment(self) -> &'static str {
        match self {
            CatalogKind::Tags => "tags",
            CatalogKind::Ingredients => "ingredients",
            CatalogKind::Categories => "categories",
            CatalogKind::MenuItems => "menuitems",
        }
    }
}

impl Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Some list endpoints answer with a bare array, others wrap it under the resource name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CatalogList {
    Bare(Vec<CatalogItem>),
    Wrapped(serde_json::Map<String, serde_json::Value>),
}

impl CatalogList {
    pub fn into_items(self, kind: CatalogKind) -> Result<Vec<CatalogItem>, serde_json::Error> {
        match self {
            CatalogList::Bare(items) => Ok(items),
            CatalogList::Wrapped(mut map) => {
                let inner = map
                    .remove(kind.segment())
                    .unwrap_or(serde_json::Value::Array(Vec::new()));
                serde_json::from_value(inner)
            }
        }
    }
}

// =============================================================================
// STAFF & AUTH
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct AttendanceEnvelope {
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ForgotPassword<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResetPassword<'a> {
    pub email: &'a str,
    pub token: &'a str,
    pub password: &'a str,
    pub password_confirmation: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfileUpdate<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PasswordChange<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
    pub new_password_confirmation: &'a str,
}
