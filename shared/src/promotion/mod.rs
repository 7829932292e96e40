//! Promotion model
//!
//! One tagged-variant config per promotion type with exhaustive
//! matching downstream, so no promotion type can be silently
//! ignored by a calculator.

pub mod applied;
pub mod condition;
pub mod config;
pub mod promotion;

// Re-exports
pub use applied::{AppliedPromoCode, AppliedPromotion, OrderPromotions};
pub use condition::PromotionCondition;
pub use config::{CodeDiscount, PromotionConfig, PromotionType};
pub use promotion::Promotion;
