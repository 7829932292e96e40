//! External collaborator interfaces
//!
//! The engine is transport-agnostic: it operates on typed entities
//! and leaves REST/RPC/in-process wiring to the implementor. Every
//! method is a suspension point; between suspension points, engine
//! state mutations are atomic with respect to the rest of the
//! subsystem.

use async_trait::async_trait;
use shared::models::{Category, Product};
use shared::order::{Order, OrderItem};
use shared::promotion::Promotion;
use thiserror::Error;

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("promotion not found: {0}")]
    PromotionNotFound(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Order persistence collaborator
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Fetch the live order for a table, if any
    async fn fetch_order(&self, table_id: &str) -> GatewayResult<Option<Order>>;

    /// Persist the item list of an order
    async fn persist_order_items(&self, order_id: &str, items: &[OrderItem])
    -> GatewayResult<()>;
}

/// Result of validating an operator-supplied promo code
#[derive(Debug, Clone)]
pub struct CodeValidation {
    pub valid: bool,
    pub promotion: Option<Promotion>,
    pub message: Option<String>,
}

/// Promotion definition source
#[async_trait]
pub trait PromotionSource: Send + Sync {
    async fn fetch_active_promotions(&self) -> GatewayResult<Vec<Promotion>>;

    async fn fetch_promotion_by_id(&self, id: &str) -> GatewayResult<Option<Promotion>>;

    /// Record one use of a code-bound promotion
    async fn increment_usage(&self, id: &str) -> GatewayResult<()>;

    async fn validate_promo_code(&self, code: &str) -> GatewayResult<CodeValidation>;
}

/// Catalog lookup collaborator
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self) -> GatewayResult<Vec<Product>>;

    async fn fetch_categories(&self) -> GatewayResult<Vec<Category>>;
}
