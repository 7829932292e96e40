//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity
///
/// At most one live [`Order`](crate::order::Order) references a
/// table at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    pub name: String,
    pub capacity: i32,
    pub is_active: bool,
}
