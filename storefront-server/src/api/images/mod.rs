//! Image URL resolution
//!
//! `GET /api/images/resolve?src=...&bucket=...&check=true`
//!
//! Without `check` the public URL is computed locally. With `check` the
//! public URL is probed and a short-lived signed URL is returned instead
//! when it does not load.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/images/resolve", get(resolve))
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    #[serde(default)]
    pub src: String,
    pub bucket: Option<String>,
    #[serde(default)]
    pub check: bool,
}

#[derive(Debug, Serialize)]
pub struct ResolvedImage {
    pub url: Option<String>,
}

/// GET /api/images/resolve
pub async fn resolve(
    State(state): State<ServerState>,
    Query(query): Query<ResolveQuery>,
) -> Json<ResolvedImage> {
    let bucket = query.bucket.as_deref().filter(|b| !b.trim().is_empty());
    let url = if query.check {
        state.storage.resolve_with_fallback(&query.src, bucket).await
    } else {
        state.storage.public_url(&query.src, bucket)
    };
    Json(ResolvedImage { url })
}
