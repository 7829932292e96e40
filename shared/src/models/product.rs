//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Category reference (String ID)
    pub category: String,
    /// Sale price in minor currency units
    pub price: i64,
    pub sort_order: i32,
    pub is_active: bool,
}
