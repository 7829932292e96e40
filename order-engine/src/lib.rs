//! Order reconciliation and promotion engine
//!
//! Keeps a locally-mutated order consistent with its authoritative
//! remote copy, and computes which promotional discounts apply to
//! it:
//!
//! - **fingerprint**: cheap order-sensitive digests of an item list,
//!   used to detect divergence without deep-equality scans
//! - **store**: the in-memory order aggregate — a locally edited
//!   `current` copy and the `original` copy last confirmed synced
//! - **sync**: debounced single-flight reconciliation worker
//! - **session**: ties store and worker into one order session
//! - **promotions**: priority/stackability-aware rule evaluator with
//!   per-type discount calculators
//! - **gateway**: abstract external collaborators (fetch/persist
//!   orders, promotion and catalog sources)
//!
//! # Data Flow
//!
//! ```text
//! operator mutation → OrderStore (optimistic update)
//!         ↓
//!    SyncWorker (debounce → persist → confirmatory fetch)
//!         ↓
//!    OrderStore merge (fingerprint-gated)
//!
//! OrderStore items → PromotionEvaluator → OrderPromotions
//!         ↓
//!    displayed total = subtotal − total_discount
//! ```

pub mod config;
pub mod fingerprint;
pub mod gateway;
pub mod promotions;
pub mod session;
pub mod store;
pub(crate) mod sync;

// Re-exports
pub use config::EngineConfig;
pub use fingerprint::{Fingerprint, SnapshotCache};
pub use gateway::{
    CatalogSource, CodeValidation, GatewayError, GatewayResult, OrderGateway, PromotionSource,
};
pub use promotions::{PromoCodeError, PromotionEvaluator};
pub use session::OrderSession;
pub use store::{Mutation, OrderStore, RefreshOutcome, SyncState};

// Re-export shared types for convenience
pub use shared::order::{ItemState, KitchenStatus, Order, OrderItem};
pub use shared::promotion::{
    AppliedPromoCode, AppliedPromotion, OrderPromotions, Promotion, PromotionCondition,
    PromotionConfig,
};
