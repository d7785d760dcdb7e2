//! Site settings API
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/settings/branding | GET | never fails, defaults on read errors |
//! | /api/admin/settings/branding | PUT | notifies every viewer |
//! | /api/admin/settings/default-theme | GET, PUT | `slug: null` clears it |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/settings/branding", get(handler::branding))
        .route("/api/admin/settings/branding", put(handler::update_branding))
        .route(
            "/api/admin/settings/default-theme",
            get(handler::default_theme).put(handler::set_default_theme),
        )
}
