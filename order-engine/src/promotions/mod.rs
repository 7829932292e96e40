//! Promotion rule evaluation
//!
//! Pure function of (order, promotion set, applied codes, clock):
//! candidates are filtered to active definitions inside their
//! validity window, ordered by priority descending with definition
//! order breaking ties, and accepted only when every condition
//! holds and their calculator yields a positive discount.
//! Stackability gates combination: a non-stackable candidate is
//! rejected once anything else has been accepted for the order.
//!
//! Two tracks feed one pass: automatic promotions, then
//! code-bound promotions the operator has applied. A definition
//! fetch failure degrades to an empty evaluation rather than an
//! error; the caller keeps the previous totals until a later
//! evaluation succeeds.

pub mod calculators;
pub mod conditions;

use crate::gateway::{CatalogSource, GatewayError, PromotionSource};
use calculators::Discount;
use chrono::Utc;
use chrono_tz::Tz;
use conditions::EvalContext;
use shared::models::Product;
use shared::order::Order;
use shared::promotion::{AppliedPromoCode, AppliedPromotion, OrderPromotions, Promotion};
use shared::util;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Promo code application errors. These surface to the operator;
/// evaluation itself never errors.
#[derive(Debug, Error)]
pub enum PromoCodeError {
    #[error("code already applied: {0}")]
    AlreadyApplied(String),

    #[error("{message}")]
    Invalid { message: String },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Evaluates the active promotion set against an order
pub struct PromotionEvaluator {
    promotions: Arc<dyn PromotionSource>,
    catalog: Arc<dyn CatalogSource>,
    tz: Tz,
}

impl PromotionEvaluator {
    pub fn new(promotions: Arc<dyn PromotionSource>, catalog: Arc<dyn CatalogSource>, tz: Tz) -> Self {
        Self {
            promotions,
            catalog,
            tz,
        }
    }

    /// Evaluate all applicable promotions for an order.
    ///
    /// `applied_codes` are the codes the operator has entered so
    /// far; they are carried into the result unchanged so a failed
    /// evaluation never loses them.
    pub async fn evaluate(&self, order: &Order, applied_codes: &[AppliedPromoCode]) -> OrderPromotions {
        let mut result = OrderPromotions {
            applied_promo_codes: applied_codes.to_vec(),
            ..Default::default()
        };

        let active = match self.promotions.fetch_active_promotions().await {
            Ok(promotions) => promotions,
            Err(e) => {
                tracing::warn!(error = %e, "promotion fetch failed; skipping evaluation");
                return result;
            }
        };

        let products = self.product_index().await;
        let now_millis = util::now_millis();
        let ctx = EvalContext {
            order,
            products: &products,
            now: Utc::now().with_timezone(&self.tz),
        };

        let mut candidates: Vec<&Promotion> = active
            .iter()
            .filter(|p| p.active && p.is_within_window(now_millis) && !p.is_code_bound())
            .collect();
        // Stable sort keeps definition order among equal priorities
        candidates.sort_by_key(|p| std::cmp::Reverse(p.priority));

        let mut accepted_ids: HashSet<String> = HashSet::new();

        for promotion in candidates {
            self.consider(promotion, &ctx, &mut result, &mut accepted_ids);
        }

        // Code track: resolve each valid code to its definition and
        // run the set through the same priority-ordered acceptance
        // rules, so entry order never decides between competing codes
        let mut code_candidates: Vec<Promotion> = Vec::new();
        for code in applied_codes.iter().filter(|c| c.valid) {
            match self.resolve_code_promotion(&active, &code.promotion_id).await {
                Some(p) if p.active && p.is_within_window(now_millis) => code_candidates.push(p),
                Some(_) => {}
                None => {
                    tracing::warn!(code = %code.code, promotion_id = %code.promotion_id,
                        "code promotion unavailable; skipping");
                }
            }
        }
        code_candidates.sort_by_key(|p| std::cmp::Reverse(p.priority));

        for promotion in &code_candidates {
            let accepted = self.consider(promotion, &ctx, &mut result, &mut accepted_ids);
            if accepted {
                if let Err(e) = self.promotions.increment_usage(&promotion.id).await {
                    tracing::warn!(promotion_id = %promotion.id, error = %e,
                        "usage increment failed");
                }
            }
        }

        result.total_discount = result.total_discount.clamp(0, order.compute_subtotal());
        result
    }

    /// Validate an operator-entered promo code against the backend
    /// and reject duplicates of already-applied codes.
    pub async fn apply_code(
        &self,
        code: &str,
        existing: &[AppliedPromoCode],
    ) -> Result<AppliedPromoCode, PromoCodeError> {
        let code = code.trim();
        if existing.iter().any(|c| c.code.eq_ignore_ascii_case(code)) {
            return Err(PromoCodeError::AlreadyApplied(code.to_string()));
        }

        let validation = self.promotions.validate_promo_code(code).await?;
        match validation.promotion {
            Some(promotion) if validation.valid => Ok(AppliedPromoCode {
                code: code.to_string(),
                promotion_id: promotion.id,
                valid: true,
                message: validation.message,
            }),
            _ => Err(PromoCodeError::Invalid {
                message: validation
                    .message
                    .unwrap_or_else(|| "invalid promo code".to_string()),
            }),
        }
    }

    /// Apply one candidate against the acceptance rules. Returns
    /// whether it was accepted.
    fn consider(
        &self,
        promotion: &Promotion,
        ctx: &EvalContext<'_>,
        result: &mut OrderPromotions,
        accepted_ids: &mut HashSet<String>,
    ) -> bool {
        if accepted_ids.contains(&promotion.id) {
            return false;
        }
        if promotion.usage_exhausted() {
            tracing::debug!(promotion_id = %promotion.id, "usage limit reached");
            return false;
        }
        if !promotion.stackable && !accepted_ids.is_empty() {
            return false;
        }
        if !promotion.conditions.iter().all(|c| conditions::check(c, ctx)) {
            return false;
        }
        let Some(Discount {
            amount,
            affected_items,
        }) = calculators::calculate(&promotion.config, ctx.order, ctx.products)
        else {
            return false;
        };

        result.applied_promotions.push(AppliedPromotion {
            promotion_id: promotion.id.clone(),
            promotion_name: promotion.name.clone(),
            promotion_type: promotion.config.promotion_type(),
            discount_amount: amount,
            affected_items,
        });
        result.total_discount += amount;
        accepted_ids.insert(promotion.id.clone());
        tracing::debug!(promotion_id = %promotion.id, amount, "promotion accepted");
        true
    }

    async fn resolve_code_promotion(&self, active: &[Promotion], id: &str) -> Option<Promotion> {
        if let Some(p) = active.iter().find(|p| p.id == id) {
            return Some(p.clone());
        }
        match self.promotions.fetch_promotion_by_id(id).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(promotion_id = %id, error = %e, "promotion lookup failed");
                None
            }
        }
    }

    async fn product_index(&self) -> HashMap<String, Product> {
        match self.catalog.fetch_products().await {
            Ok(products) => products.into_iter().map(|p| (p.id.clone(), p)).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "catalog fetch failed; category conditions will not match");
                HashMap::new()
            }
        }
    }
}
