//! Percentage off the order subtotal

use super::{all_item_ids, Discount};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::order::Order;

pub(super) fn calculate(order: &Order, percentage: u32, max_discount: Option<i64>) -> Option<Discount> {
    let amount = percentage_of(order.compute_subtotal(), percentage);
    let amount = match max_discount {
        Some(cap) => amount.min(cap),
        None => amount,
    };
    Discount::positive(amount, all_item_ids(order))
}

/// Whole-percent share of an amount in minor units, rounded half
/// away from zero.
pub(crate) fn percentage_of(amount: i64, percentage: u32) -> i64 {
    (Decimal::from(amount) * Decimal::from(percentage) / Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}
