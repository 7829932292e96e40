//! Promotion condition checks
//!
//! Every condition on a promotion must hold (logical AND) for the
//! promotion to be eligible. Day and time checks run against the
//! business time zone carried by the engine config.

use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;
use shared::models::Product;
use shared::order::Order;
use shared::promotion::PromotionCondition;
use std::collections::HashMap;

/// Everything a condition may look at
pub struct EvalContext<'a> {
    pub order: &'a Order,
    /// Product id → product, for category lookups
    pub products: &'a HashMap<String, Product>,
    pub now: DateTime<Tz>,
}

pub fn check(condition: &PromotionCondition, ctx: &EvalContext<'_>) -> bool {
    match condition {
        PromotionCondition::MinOrderAmount(min) => ctx.order.compute_subtotal() >= *min,
        PromotionCondition::MinItems(min) => ctx.order.item_count() >= *min,
        PromotionCondition::SpecificProducts(ids) => ctx
            .order
            .items
            .iter()
            .any(|item| ids.contains(&item.product_id)),
        PromotionCondition::SpecificCategory(ids) => ctx.order.items.iter().any(|item| {
            ctx.products
                .get(&item.product_id)
                .is_some_and(|p| ids.contains(&p.category))
        }),
        PromotionCondition::SpecificDay(days) => {
            days.contains(&(ctx.now.weekday().num_days_from_sunday() as u8))
        }
        PromotionCondition::SpecificTime(window) => match parse_time_window(window) {
            Some((start, end)) => {
                let minute = ctx.now.hour() * 60 + ctx.now.minute();
                start <= minute && minute <= end
            }
            None => {
                tracing::warn!(window = %window, "unparseable time window; condition fails");
                false
            }
        },
    }
}

/// Parse `"HH:MM-HH:MM"` into an inclusive minute-of-day range.
/// Overnight wraparound (start > end) is not supported.
pub(crate) fn parse_time_window(window: &str) -> Option<(u32, u32)> {
    let (start, end) = window.split_once('-')?;
    let start = parse_hhmm(start)?;
    let end = parse_hhmm(end)?;
    (start <= end).then_some((start, end))
}

fn parse_hhmm(s: &str) -> Option<u32> {
    let (hours, minutes) = s.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    (hours < 24 && minutes < 60).then_some(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::order::{ItemState, KitchenStatus, OrderItem};

    const TZ: Tz = chrono_tz::America::Bogota;

    fn order(lines: &[(&str, i64, i32)]) -> Order {
        Order {
            id: "o1".to_string(),
            table_id: "t1".to_string(),
            items: lines
                .iter()
                .enumerate()
                .map(|(idx, (product_id, price, qty))| OrderItem {
                    id: format!("i{}", idx),
                    product_id: product_id.to_string(),
                    name: product_id.to_string(),
                    unit_price: *price,
                    quantity: *qty,
                    comment: None,
                    exclusions: vec![],
                    state: ItemState::Pending,
                    promotion_applied: false,
                    original_price: None,
                })
                .collect(),
            subtotal: 0,
            total: 0,
            status: KitchenStatus::NotSent,
            payment: None,
            created_at: 0,
        }
    }

    fn catalog(entries: &[(&str, &str)]) -> HashMap<String, Product> {
        entries
            .iter()
            .map(|(id, category)| {
                (
                    id.to_string(),
                    Product {
                        id: id.to_string(),
                        name: id.to_string(),
                        category: category.to_string(),
                        price: 1000,
                        sort_order: 0,
                        is_active: true,
                    },
                )
            })
            .collect()
    }

    // 2026-08-24 is a Monday
    fn monday_at(hour: u32, minute: u32) -> DateTime<Tz> {
        TZ.with_ymd_and_hms(2026, 8, 24, hour, minute, 0).unwrap()
    }

    fn ctx<'a>(
        order: &'a Order,
        products: &'a HashMap<String, Product>,
        now: DateTime<Tz>,
    ) -> EvalContext<'a> {
        EvalContext {
            order,
            products,
            now,
        }
    }

    #[test]
    fn test_min_order_amount() {
        let order = order(&[("p1", 8000, 2)]);
        let products = catalog(&[]);
        let ctx = ctx(&order, &products, monday_at(12, 0));
        assert!(check(&PromotionCondition::MinOrderAmount(16000), &ctx));
        assert!(!check(&PromotionCondition::MinOrderAmount(16001), &ctx));
    }

    #[test]
    fn test_min_items_sums_quantities() {
        let order = order(&[("p1", 8000, 2), ("p2", 5000, 1)]);
        let products = catalog(&[]);
        let ctx = ctx(&order, &products, monday_at(12, 0));
        assert!(check(&PromotionCondition::MinItems(3), &ctx));
        assert!(!check(&PromotionCondition::MinItems(4), &ctx));
    }

    #[test]
    fn test_specific_products() {
        let order = order(&[("p1", 8000, 1)]);
        let products = catalog(&[]);
        let ctx = ctx(&order, &products, monday_at(12, 0));
        assert!(check(
            &PromotionCondition::SpecificProducts(vec!["p1".to_string(), "p9".to_string()]),
            &ctx
        ));
        assert!(!check(
            &PromotionCondition::SpecificProducts(vec!["p9".to_string()]),
            &ctx
        ));
    }

    #[test]
    fn test_specific_category() {
        let order = order(&[("p1", 8000, 1)]);
        let products = catalog(&[("p1", "burgers")]);
        let ctx = ctx(&order, &products, monday_at(12, 0));
        assert!(check(
            &PromotionCondition::SpecificCategory(vec!["burgers".to_string()]),
            &ctx
        ));
        assert!(!check(
            &PromotionCondition::SpecificCategory(vec!["drinks".to_string()]),
            &ctx
        ));
    }

    #[test]
    fn test_specific_category_unknown_product_fails() {
        let order = order(&[("p1", 8000, 1)]);
        let products = catalog(&[]);
        let ctx = ctx(&order, &products, monday_at(12, 0));
        assert!(!check(
            &PromotionCondition::SpecificCategory(vec!["burgers".to_string()]),
            &ctx
        ));
    }

    #[test]
    fn test_specific_day() {
        let order = order(&[("p1", 8000, 1)]);
        let products = catalog(&[]);
        let ctx = ctx(&order, &products, monday_at(12, 0));
        // Monday = 1 in the 0=Sunday encoding
        assert!(check(&PromotionCondition::SpecificDay(vec![1]), &ctx));
        assert!(!check(&PromotionCondition::SpecificDay(vec![0, 6]), &ctx));
    }

    #[test]
    fn test_specific_time_inclusive_bounds() {
        let order = order(&[("p1", 8000, 1)]);
        let products = catalog(&[]);
        let window = PromotionCondition::SpecificTime("12:00-14:30".to_string());

        for (hour, minute, expected) in [
            (11, 59, false),
            (12, 0, true),
            (13, 15, true),
            (14, 30, true),
            (14, 31, false),
        ] {
            let ctx = ctx(&order, &products, monday_at(hour, minute));
            assert_eq!(check(&window, &ctx), expected, "{:02}:{:02}", hour, minute);
        }
    }

    #[test]
    fn test_bad_time_window_fails_closed() {
        let order = order(&[("p1", 8000, 1)]);
        let products = catalog(&[]);
        let ctx = ctx(&order, &products, monday_at(12, 0));
        for bad in ["nonsense", "25:00-26:00", "12:00", "22:00-02:00"] {
            assert!(
                !check(&PromotionCondition::SpecificTime(bad.to_string()), &ctx),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_time_window() {
        assert_eq!(parse_time_window("09:30-17:00"), Some((570, 1020)));
        assert_eq!(parse_time_window("00:00-23:59"), Some((0, 1439)));
        assert_eq!(parse_time_window("17:00-09:30"), None);
        assert_eq!(parse_time_window("9:30"), None);
    }
}
