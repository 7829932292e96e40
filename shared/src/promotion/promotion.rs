//! Promotion entity

use super::config::PromotionConfig;
use super::condition::PromotionCondition;
use serde::{Deserialize, Serialize};

/// Promotion definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Promotion {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub active: bool,
    /// Validity window start (Unix millis, inclusive)
    pub start_date: i64,
    /// Validity window end (Unix millis, exclusive; None = open-ended)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
    /// All must hold (logical AND)
    #[serde(default)]
    pub conditions: Vec<PromotionCondition>,
    pub config: PromotionConfig,
    /// Higher priority is evaluated first
    pub priority: i32,
    /// May be combined with other already-accepted promotions
    pub stackable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub usage_count: u32,
}

impl Promotion {
    /// Half-open validity window: inclusive start, exclusive end
    pub fn is_within_window(&self, now_millis: i64) -> bool {
        self.start_date <= now_millis && self.end_date.is_none_or(|end| now_millis < end)
    }

    pub fn usage_exhausted(&self) -> bool {
        self.usage_limit
            .is_some_and(|limit| self.usage_count >= limit)
    }

    /// Whether this promotion is applied via an operator-entered
    /// code rather than automatically
    pub fn is_code_bound(&self) -> bool {
        matches!(self.config, PromotionConfig::CodePromo { .. })
    }
}
