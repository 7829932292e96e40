//! Promotion type-tagged configuration

use serde::{Deserialize, Serialize};

/// Promotion type discriminant, carried on result records
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PromotionType {
    BuyXGetY,
    Percentage,
    FixedAmount,
    FreeItem,
    CodePromo,
}

/// Discount carried by a code-bound promotion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CodeDiscount {
    Percentage {
        /// Whole percent (10 = 10%)
        percentage: u32,
        /// Cap in minor currency units
        #[serde(skip_serializing_if = "Option::is_none")]
        max_discount: Option<i64>,
    },
    FixedAmount {
        /// Minor currency units
        amount: i64,
    },
}

/// Type-tagged promotion configuration (mutually exclusive variants)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum PromotionConfig {
    /// Buy X, get Y free (2x1, 3x2, ...)
    BuyXGetY {
        buy_quantity: u32,
        get_quantity: u32,
        /// Restricts eligibility to these products when present
        #[serde(skip_serializing_if = "Option::is_none")]
        target_products: Option<Vec<String>>,
    },
    /// Percentage off the whole order, optionally capped
    Percentage {
        /// Whole percent (10 = 10%)
        percentage: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_discount: Option<i64>,
    },
    /// Fixed amount off the whole order
    FixedAmount { amount: i64 },
    /// A designated product offered for free
    FreeItem { item_id: String, quantity: u32 },
    /// Operator-entered code bound to a carried discount
    CodePromo {
        code: String,
        #[serde(default)]
        per_customer: bool,
        discount: CodeDiscount,
    },
}

impl PromotionConfig {
    pub fn promotion_type(&self) -> PromotionType {
        match self {
            PromotionConfig::BuyXGetY { .. } => PromotionType::BuyXGetY,
            PromotionConfig::Percentage { .. } => PromotionType::Percentage,
            PromotionConfig::FixedAmount { .. } => PromotionType::FixedAmount,
            PromotionConfig::FreeItem { .. } => PromotionType::FreeItem,
            PromotionConfig::CodePromo { .. } => PromotionType::CodePromo,
        }
    }
}
