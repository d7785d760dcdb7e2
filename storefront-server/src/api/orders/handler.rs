//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use shared::error::AppResult;
use shared::models::{
    BulkDeleteRequest, BulkDeleteResult, Order, OrderCreate, OrderListQuery, VerifyOrderRequest,
};
use uuid::Uuid;

use crate::core::ServerState;

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.orders.create_order(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/admin/orders
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_orders(query.status).await?))
}

/// GET /api/admin/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.get_order(id).await?))
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// GET /api/admin/orders/unverified-count
pub async fn unverified_count(State(state): State<ServerState>) -> AppResult<Json<CountResponse>> {
    let count = state.orders.approved_unverified_count().await?;
    Ok(Json(CountResponse { count }))
}

/// POST /api/admin/orders/{id}/approve
pub async fn approve(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.approve(id).await?))
}

/// POST /api/admin/orders/{id}/reject
pub async fn reject(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.reject(id).await?))
}

/// POST /api/admin/orders/{id}/verify
pub async fn verify(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VerifyOrderRequest>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.verify(id, payload.notes).await?))
}

/// POST /api/admin/orders/{id}/unverify
pub async fn unverify(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.unverify(id).await?))
}

/// POST /api/admin/orders/bulk-delete
pub async fn bulk_delete(
    State(state): State<ServerState>,
    Json(payload): Json<BulkDeleteRequest>,
) -> AppResult<Json<BulkDeleteResult>> {
    Ok(Json(state.orders.bulk_delete(payload).await?))
}
