//! Theme API
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/themes | GET | active themes for the picker |
//! | /api/themes/current | GET | resolve, apply and return the viewer's theme |
//! | /api/themes/current | PUT | select a theme (identified viewers only) |
//! | /api/themes/current | DELETE | drop the selection, back to the default |
//! | /api/themes/current/stylesheet | GET | applied root as `text/css` |
//! | /api/admin/themes | GET, POST | list all, create |
//! | /api/admin/themes/{id} | GET, PUT, DELETE | |
//! | /api/admin/themes/{id}/toggle-active | POST | |
//! | /api/admin/themes/slug | POST | slug suggestion for a name |
//! | /api/admin/theme-presets | GET | |
//! | /api/admin/theme-presets/{key} | GET | blank form prefilled from a preset |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/themes", viewer_routes())
        .nest("/api/admin", admin_routes())
}

fn viewer_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_active))
        .route(
            "/current",
            get(handler::current)
                .put(handler::select)
                .delete(handler::reset),
        )
        .route("/current/stylesheet", get(handler::stylesheet))
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/themes", get(handler::list).post(handler::create))
        .route("/themes/slug", post(handler::suggest_slug))
        .route(
            "/themes/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/themes/{id}/toggle-active", post(handler::toggle_active))
        .route("/theme-presets", get(handler::list_presets))
        .route("/theme-presets/{key}", get(handler::preset_form))
}
