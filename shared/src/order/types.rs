//! Order aggregate and kitchen state

use super::item::OrderItem;
use serde::{Deserialize, Serialize};

/// Kitchen state of the whole order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KitchenStatus {
    #[default]
    NotSent,
    Sent,
    Ready,
    Served,
    Paid,
}

/// Payment metadata recorded when an order is settled
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentInfo {
    pub method: String,
    /// Amount paid, minor currency units
    pub amount: i64,
    /// Unix millis
    pub paid_at: i64,
}

/// Order aggregate
///
/// Exactly one order is live per table at a time; the client holds
/// at most one in-memory copy plus one historical snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    /// Dining table reference (String ID)
    pub table_id: String,
    pub items: Vec<OrderItem>,
    /// Sum of unit_price * quantity before any discount
    pub subtotal: i64,
    /// Displayed total after promotion discounts, never negative
    pub total: i64,
    #[serde(default)]
    pub status: KitchenStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInfo>,
    /// Unix millis
    pub created_at: i64,
}

impl Order {
    /// Compute the subtotal from the current item list
    pub fn compute_subtotal(&self) -> i64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Sum of item quantities
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity as i64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::ItemState;
    use crate::util;

    fn order_with(prices: &[(i64, i32)]) -> Order {
        Order {
            id: "o1".to_string(),
            table_id: "t1".to_string(),
            items: prices
                .iter()
                .enumerate()
                .map(|(idx, (price, qty))| OrderItem {
                    id: format!("i{}", idx),
                    product_id: format!("p{}", idx),
                    name: format!("P{}", idx),
                    unit_price: *price,
                    quantity: *qty,
                    comment: None,
                    exclusions: vec![],
                    state: ItemState::Pending,
                    promotion_applied: false,
                    original_price: None,
                })
                .collect(),
            subtotal: 0,
            total: 0,
            status: KitchenStatus::NotSent,
            payment: None,
            created_at: util::now_millis(),
        }
    }

    #[test]
    fn test_compute_subtotal() {
        let order = order_with(&[(8000, 2), (12000, 1)]);
        assert_eq!(order.compute_subtotal(), 28000);
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_empty_order_subtotal() {
        let order = order_with(&[]);
        assert_eq!(order.compute_subtotal(), 0);
    }
}
