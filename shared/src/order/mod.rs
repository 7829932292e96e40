//! Order aggregate types
//!
//! The order is the unit of reconciliation: one live order per
//! table, holding an ordered item list plus computed totals.
//! Insertion order of items is significant for display grouping
//! but not for merge logic.

pub mod item;
pub mod types;

// Re-exports
pub use item::{ItemState, OrderItem};
pub use types::{KitchenStatus, Order, PaymentInfo};
