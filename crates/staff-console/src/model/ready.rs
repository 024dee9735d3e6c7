//! Orders as reported by `GET /api/orders/ready`.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Backend order identifier, stable across polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An order waiting at the pickup counter.
///
/// Only `order_id` drives the rotation. Everything else is carried through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadyOrder {
    pub order_id: OrderId,
    /// Absent for takeaway and remote orders.
    #[serde(default, deserialize_with = "label")]
    pub table_number: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ReadyOrder {
    pub fn new(order_id: u64, table_number: Option<&str>) -> Self {
        Self {
            order_id: OrderId(order_id),
            table_number: table_number.map(str::to_string),
            extra: serde_json::Map::new(),
        }
    }
}

/// Accepts `"12"`, `12` or `null`; the backend is not consistent about table numbers.
pub(crate) fn label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Label>::deserialize(deserializer)?.map(|l| match l {
        Label::Text(s) => s,
        Label::Number(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_number_accepts_numbers_and_strings() {
        let orders: Vec<ReadyOrder> = serde_json::from_str(
            r#"[
                {"order_id": 1, "table_number": 7},
                {"order_id": 2, "table_number": "T3", "customer": "Ana"},
                {"order_id": 3, "table_number": null},
                {"order_id": 4}
            ]"#,
        )
        .unwrap();

        assert_eq!(orders[0].table_number.as_deref(), Some("7"));
        assert_eq!(orders[1].table_number.as_deref(), Some("T3"));
        assert_eq!(orders[1].extra["customer"], "Ana");
        assert_eq!(orders[2].table_number, None);
        assert_eq!(orders[3].table_number, None);
    }
}
