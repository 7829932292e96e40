//! Catalog models
//!
//! Shared between the order engine and any front end (via API).
//! All IDs are `String` (backend-assigned).

pub mod category;
pub mod dining_table;
pub mod product;

// Re-exports
pub use category::*;
pub use dining_table::*;
pub use product::*;
