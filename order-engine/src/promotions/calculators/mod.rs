//! Discount calculators
//!
//! One calculator per promotion config variant. Each takes the
//! order plus the product index and returns the discount in minor
//! currency units together with the affected item lines. A
//! calculator that does not apply returns `None`; discounts are
//! never negative and never exceed the order subtotal (the caller
//! clamps the aggregate).

mod buy_x_get_y;
mod code_promo;
mod fixed_amount;
mod free_item;
mod percentage;

use shared::models::Product;
use shared::order::Order;
use shared::promotion::PromotionConfig;
use std::collections::HashMap;

/// A single promotion's computed discount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discount {
    /// Minor currency units, always > 0
    pub amount: i64,
    /// Item line ids the discount is attributed to; empty when it
    /// applies to the order as a whole rather than specific lines
    pub affected_items: Vec<String>,
}

impl Discount {
    /// Build a discount, filtering out zero and negative amounts.
    pub(crate) fn positive(amount: i64, affected_items: Vec<String>) -> Option<Discount> {
        (amount > 0).then_some(Discount {
            amount,
            affected_items,
        })
    }
}

/// Dispatch to the calculator for the promotion's config variant.
pub fn calculate(
    config: &PromotionConfig,
    order: &Order,
    products: &HashMap<String, Product>,
) -> Option<Discount> {
    match config {
        PromotionConfig::BuyXGetY {
            buy_quantity,
            get_quantity,
            target_products,
        } => buy_x_get_y::calculate(order, *buy_quantity, *get_quantity, target_products.as_deref()),
        PromotionConfig::Percentage {
            percentage,
            max_discount,
        } => percentage::calculate(order, *percentage, *max_discount),
        PromotionConfig::FixedAmount { amount } => fixed_amount::calculate(order, *amount),
        PromotionConfig::FreeItem { item_id, quantity } => {
            free_item::calculate(products, item_id, *quantity)
        }
        PromotionConfig::CodePromo { discount, .. } => code_promo::calculate(order, discount),
    }
}

pub(crate) fn all_item_ids(order: &Order) -> Vec<String> {
    order.items.iter().map(|item| item.id.clone()).collect()
}
