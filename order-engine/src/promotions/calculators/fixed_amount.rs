//! Fixed amount off the order

use super::{all_item_ids, Discount};
use shared::order::Order;

pub(super) fn calculate(order: &Order, amount: i64) -> Option<Discount> {
    let capped = amount.min(order.compute_subtotal());
    Discount::positive(capped, all_item_ids(order))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::order;
    use super::*;

    #[test]
    fn test_fixed_amount() {
        let order = order(&[("i1", "burger", 8000, 2)]);
        let d = calculate(&order, 2000).unwrap();
        assert_eq!(d.amount, 2000);
        assert_eq!(d.affected_items, vec!["i1"]);
    }

    #[test]
    fn test_capped_at_subtotal() {
        let order = order(&[("i1", "soda", 3000, 1)]);
        let d = calculate(&order, 5000).unwrap();
        assert_eq!(d.amount, 3000);
    }

    #[test]
    fn test_nonpositive_amount_no_discount() {
        let order = order(&[("i1", "soda", 3000, 1)]);
        assert_eq!(calculate(&order, 0), None);
        assert_eq!(calculate(&order, -100), None);
    }
}
