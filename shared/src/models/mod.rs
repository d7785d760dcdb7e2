//! Data models
//!
//! Shared between storefront-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are UUIDs; timestamps are UTC.

pub mod order;
pub mod product;
pub mod revenue;
pub mod setting;
pub mod theme;

// Re-exports
pub use order::*;
pub use product::*;
pub use revenue::*;
pub use setting::*;
pub use theme::*;
