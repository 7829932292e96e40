//! Shared types for the order engine
//!
//! Domain models used across the workspace: catalog entities,
//! the order aggregate, and the promotion model. No transport or
//! storage concerns live here; the engine consumes these types
//! regardless of how they are fetched or persisted.

pub mod models;
pub mod order;
pub mod promotion;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
