//! Order API
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/orders | POST | checkout, creates a pending order |
//! | /api/admin/orders | GET | `?status=pending|approved|rejected` |
//! | /api/admin/orders/unverified-count | GET | approved orders awaiting payment check |
//! | /api/admin/orders/bulk-delete | POST | inclusive UTC date range, confirmation required |
//! | /api/admin/orders/{id} | GET | |
//! | /api/admin/orders/{id}/approve | POST | decrements stock |
//! | /api/admin/orders/{id}/reject | POST | |
//! | /api/admin/orders/{id}/verify | POST | `{ "notes": ... }` |
//! | /api/admin/orders/{id}/unverify | POST | |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", post(handler::create))
        .nest("/api/admin/orders", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/unverified-count", get(handler::unverified_count))
        .route("/bulk-delete", post(handler::bulk_delete))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/approve", post(handler::approve))
        .route("/{id}/reject", post(handler::reject))
        .route("/{id}/verify", post(handler::verify))
        .route("/{id}/unverify", post(handler::unverify))
}
