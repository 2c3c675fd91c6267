//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MenuItem, OrderId, UserId};

/// One line of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item: MenuItem,
    pub quantity: u32,
}

impl OrderItem {
    /// Sum of quantities across `items`.
    #[must_use]
    pub fn total(items: &[Self]) -> u32 {
        items
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }
}

/// A placed order as returned by the orders API.
///
/// ```json
/// {
///   "id": 1,
///   "user_id": "user_2abc",
///   "items": [{"item": "burgers", "quantity": 2}],
///   "total_items": 2,
///   "created_at": "2026-01-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Customer who placed the order; anonymous kiosk orders have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub items: Vec<OrderItem>,
    pub total_items: u32,
    pub created_at: DateTime<Utc>,
}
