//! Revenue reporting API
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/admin/revenue | GET | `?period=week|month|quarter|year`, oldest bucket first |
//! | /api/admin/revenue/summary | GET | verified and pending totals |
//! | /api/admin/dashboard | GET | |

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use shared::error::AppResult;
use shared::models::{DashboardStats, RevenuePeriod, RevenueRow, RevenueSummary};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/revenue", get(by_period))
        .route("/api/admin/revenue/summary", get(summary))
        .route("/api/admin/dashboard", get(dashboard))
}

#[derive(Debug, Default, Deserialize)]
pub struct RevenueQuery {
    #[serde(default)]
    pub period: RevenuePeriod,
}

/// GET /api/admin/revenue
pub async fn by_period(
    State(state): State<ServerState>,
    Query(query): Query<RevenueQuery>,
) -> AppResult<Json<Vec<RevenueRow>>> {
    Ok(Json(state.revenue.revenue_by_period(query.period).await?))
}

/// GET /api/admin/revenue/summary
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<RevenueSummary>> {
    Ok(Json(state.revenue.summary().await?))
}

/// GET /api/admin/dashboard
pub async fn dashboard(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    Ok(Json(state.revenue.dashboard().await?))
}
