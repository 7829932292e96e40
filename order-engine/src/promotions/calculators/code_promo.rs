//! Code-bound promotion
//!
//! A code promotion carries its own discount shape and delegates to
//! the percentage or fixed-amount math once the code is accepted.

use super::{all_item_ids, percentage::percentage_of, Discount};
use shared::order::Order;
use shared::promotion::CodeDiscount;

pub(super) fn calculate(order: &Order, discount: &CodeDiscount) -> Option<Discount> {
    let amount = match discount {
        CodeDiscount::Percentage {
            percentage,
            max_discount,
        } => {
            let amount = percentage_of(order.compute_subtotal(), *percentage);
            match max_discount {
                Some(cap) => amount.min(*cap),
                None => amount,
            }
        }
        CodeDiscount::FixedAmount { amount } => (*amount).min(order.compute_subtotal()),
    };
    Discount::positive(amount, all_item_ids(order))
}
