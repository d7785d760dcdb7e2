//! HTTP API
//!
//! | Prefix | Module | Notes |
//! |--------|--------|-------|
//! | /health | health | liveness |
//! | /api/themes | themes | viewer theme selection, stylesheet |
//! | /api/admin/themes, /api/admin/theme-presets | themes | theme administration |
//! | /api/events | events | server-sent notifications |
//! | /api/settings, /api/admin/settings | settings | branding, default theme |
//! | /api/images | images | storage URL resolution |
//! | /api/orders, /api/admin/orders | orders | checkout, review, cleanup |
//! | /api/admin/revenue, /api/admin/dashboard | revenue | reporting |
//!
//! The viewer is identified by the opaque `x-user-id` header (see [`identity`]).

pub mod events;
pub mod health;
pub mod identity;
pub mod images;
pub mod orders;
pub mod revenue;
pub mod settings;
pub mod themes;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub use identity::Viewer;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(themes::router())
        .merge(events::router())
        .merge(settings::router())
        .merge(images::router())
        .merge(orders::router())
        .merge(revenue::router())
}

/// Build the application with all middleware; used by the server and by tests
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(state.config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
}
