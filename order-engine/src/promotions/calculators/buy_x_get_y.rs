//! Buy X get Y free
//!
//! Quantities are pooled per product: lines for the same product
//! count together toward bundles of `buy + get` units, and each
//! complete bundle discounts `get` units at the cheapest unit price
//! seen for that product. Grouping iterates a BTreeMap so the
//! result is deterministic regardless of line order.

use super::Discount;
use shared::order::Order;
use std::collections::BTreeMap;

struct Group {
    total_quantity: i64,
    min_unit_price: i64,
    item_ids: Vec<String>,
}

pub(super) fn calculate(
    order: &Order,
    buy_quantity: u32,
    get_quantity: u32,
    target_products: Option<&[String]>,
) -> Option<Discount> {
    let bundle = buy_quantity as i64 + get_quantity as i64;
    if bundle == 0 || get_quantity == 0 {
        return None;
    }

    let mut groups: BTreeMap<&str, Group> = BTreeMap::new();
    for item in &order.items {
        if let Some(targets) = target_products {
            if !targets.contains(&item.product_id) {
                continue;
            }
        }
        let group = groups.entry(item.product_id.as_str()).or_insert(Group {
            total_quantity: 0,
            min_unit_price: i64::MAX,
            item_ids: Vec::new(),
        });
        group.total_quantity += item.quantity as i64;
        group.min_unit_price = group.min_unit_price.min(item.unit_price);
        group.item_ids.push(item.id.clone());
    }

    let mut amount = 0i64;
    let mut affected = Vec::new();
    for group in groups.values() {
        let applications = group.total_quantity / bundle;
        if applications == 0 {
            continue;
        }
        amount += applications * get_quantity as i64 * group.min_unit_price;
        affected.extend(group.item_ids.iter().cloned());
    }
    Discount::positive(amount, affected)
}
