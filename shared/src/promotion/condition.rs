//! Promotion conditions
//!
//! A promotion applies only when every one of its conditions holds
//! (logical AND).

use serde::{Deserialize, Serialize};

/// Eligibility predicate over an order/catalog/time context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PromotionCondition {
    /// Order subtotal >= value (minor currency units)
    MinOrderAmount(i64),
    /// Sum of item quantities >= value
    MinItems(i64),
    /// At least one item's product id is in the set
    SpecificProducts(Vec<String>),
    /// At least one item's product belongs to a category in the set
    SpecificCategory(Vec<String>),
    /// Current weekday is in the set (0=Sunday..6=Saturday)
    SpecificDay(Vec<u8>),
    /// Current time of day within "HH:MM-HH:MM" (inclusive both
    /// ends, no overnight wraparound)
    SpecificTime(String),
}
