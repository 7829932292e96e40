//! Order item types

use serde::{Deserialize, Serialize};

/// Kitchen lifecycle of a single item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemState {
    /// Not yet sent to the kitchen; still freely editable
    #[default]
    Pending,
    /// Sent to the kitchen
    Sent,
    /// Kitchen marked the item ready
    Ready,
    /// Delivered to the table
    Delivered,
}

/// One line of an order
///
/// Owned exclusively by the order that contains it. The id is a
/// client-generated temporary one until the backend persists the
/// item and assigns a stable id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub id: String,
    /// Product reference (String ID)
    pub product_id: String,
    /// Product name snapshot for display
    pub name: String,
    /// Unit price in minor currency units
    pub unit_price: i64,
    /// Always >= 1
    pub quantity: i32,
    /// Free-form operator comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Excluded ingredient ids
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub state: ItemState,
    /// Set when a promotion repriced this line
    #[serde(default)]
    pub promotion_applied: bool,
    /// Pre-discount unit price, kept for display when repriced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<i64>,
}

impl OrderItem {
    /// Line total in minor currency units
    pub fn line_total(&self) -> i64 {
        self.unit_price * self.quantity as i64
    }

    /// Comment as used for merge comparison (trimmed, empty == absent)
    pub fn normalized_comment(&self) -> &str {
        self.comment.as_deref().map(str::trim).unwrap_or("")
    }

    /// Exclusion-set equality, insensitive to ordering
    pub fn same_exclusions(&self, other: &OrderItem) -> bool {
        if self.exclusions.len() != other.exclusions.len() {
            return false;
        }
        let mut a: Vec<&str> = self.exclusions.iter().map(String::as_str).collect();
        let mut b: Vec<&str> = other.exclusions.iter().map(String::as_str).collect();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }

    /// Whether `other` can be merged into this line instead of
    /// being added as a duplicate row. Only `Pending` lines merge.
    pub fn can_merge_with(&self, other: &OrderItem) -> bool {
        self.state == ItemState::Pending
            && other.state == ItemState::Pending
            && self.product_id == other.product_id
            && self.normalized_comment() == other.normalized_comment()
            && self.same_exclusions(other)
    }
}
