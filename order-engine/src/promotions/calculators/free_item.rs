//! Free item by catalog price
//!
//! Values the gifted item at its current catalog price. The
//! discount attaches to the order as a whole, not to any existing
//! line. An item missing from the catalog yields no discount.

use super::Discount;
use shared::models::Product;
use std::collections::HashMap;

pub(super) fn calculate(
    products: &HashMap<String, Product>,
    item_id: &str,
    quantity: u32,
) -> Option<Discount> {
    let Some(product) = products.get(item_id) else {
        tracing::debug!(item_id = %item_id, "free item not in catalog; skipping");
        return None;
    };
    Discount::positive(product.price * quantity as i64, Vec::new())
}
