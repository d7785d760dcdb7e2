//! Revenue aggregation (backed by SQL functions from the migrations)

use rust_decimal::Decimal;
use shared::models::{RevenuePeriod, RevenueRow, TopProduct};
use sqlx::PgPool;

use crate::db::StoreResult;

pub async fn revenue_by_period(
    pool: &PgPool,
    period: RevenuePeriod,
) -> StoreResult<Vec<RevenueRow>> {
    let rows: Vec<RevenueRow> = sqlx::query_as(
        "SELECT period, revenue, order_count, verified_count FROM get_revenue_by_period($1)",
    )
    .bind(period.as_str())
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn total_verified_revenue(pool: &PgPool) -> StoreResult<Decimal> {
    let total: Decimal = sqlx::query_scalar("SELECT get_total_verified_revenue()")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

pub async fn pending_revenue(pool: &PgPool) -> StoreResult<Decimal> {
    let total: Decimal = sqlx::query_scalar("SELECT get_pending_revenue()")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

pub async fn top_products(pool: &PgPool, limit: i64) -> StoreResult<Vec<TopProduct>> {
    let rows: Vec<TopProduct> = sqlx::query_as(
        r#"
        SELECT product_id, MAX(product_name) AS product_name, SUM(quantity)::BIGINT AS quantity
        FROM order_items
        GROUP BY product_id
        ORDER BY quantity DESC, product_name ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
