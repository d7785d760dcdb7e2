//! Storefront server: themes, branding and the order back office
//!
//! # Module layout
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # config, shared state, HTTP server
//! ├── api/           # axum routes and handlers
//! ├── db/            # DataStore trait, PostgreSQL and in-memory stores
//! ├── themes/        # resolution, per-viewer providers, admin, presets, slugs
//! ├── presentation/  # applied root style and site event bus
//! ├── orders/        # checkout, review lifecycle, revenue, bulk delete
//! ├── settings.rs    # site branding
//! ├── storage.rs     # object storage URL resolution
//! └── utils/         # logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod error;
pub mod orders;
pub mod presentation;
pub mod settings;
pub mod storage;
pub mod themes;
pub mod utils;

pub use crate::core::{Config, Server, ServerState, StoreBackend};
pub use db::{DataStore, MemoryStore, PgStore};
pub use error::{ServiceError, ServiceResult};
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};
