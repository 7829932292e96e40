//! Evaluation result records

use super::config::PromotionType;
use serde::{Deserialize, Serialize};

/// One accepted promotion on an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedPromotion {
    pub promotion_id: String,
    pub promotion_name: String,
    pub promotion_type: PromotionType,
    /// Non-negative, minor currency units
    pub discount_amount: i64,
    /// Ids of the order lines the discount touches (empty for
    /// order-level or would-be-added discounts)
    #[serde(default)]
    pub affected_items: Vec<String>,
}

/// An operator-entered code bound to a promotion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedPromoCode {
    pub code: String,
    pub promotion_id: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Aggregate evaluation result for one order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderPromotions {
    pub applied_promotions: Vec<AppliedPromotion>,
    pub applied_promo_codes: Vec<AppliedPromoCode>,
    /// Sum of discounts, clamped to the order subtotal
    pub total_discount: i64,
}
