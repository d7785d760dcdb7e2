//! Order queries and the approve / review / bulk delete units of work

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use shared::models::{Order, OrderItem, OrderStatus};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{ApproveOutcome, CreatedWindow, ReviewGuard, ReviewUpdate, StoreResult};

const ORDER_COLUMNS: &str = "id, status, verified_at, notes, customer_name, customer_phone, \
     customer_email, customer_address, delivery_time, customer_message, total_amount, \
     created_at, updated_at";

const ITEM_COLUMNS: &str = "id, order_id, product_id, product_name, quantity, \
     selected_color, selected_size, unit_price";

pub async fn insert_order(pool: &PgPool, order: &Order) -> StoreResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO orders (
            id, status, verified_at, notes, customer_name, customer_phone,
            customer_email, customer_address, delivery_time, customer_message,
            total_amount, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(order.id)
    .bind(order.status)
    .bind(order.verified_at)
    .bind(&order.notes)
    .bind(&order.customer_name)
    .bind(&order.customer_phone)
    .bind(&order.customer_email)
    .bind(&order.customer_address)
    .bind(&order.delivery_time)
    .bind(&order.customer_message)
    .bind(order.total_amount)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(&mut *tx)
    .await?;

    for item in &order.items {
        sqlx::query(
            r#"
            INSERT INTO order_items (
                id, order_id, product_id, product_name, quantity,
                selected_color, selected_size, unit_price
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(item.id)
        .bind(order.id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(item.quantity)
        .bind(&item.selected_color)
        .bind(&item.selected_size)
        .bind(item.unit_price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn find_order(pool: &PgPool, id: Uuid) -> StoreResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
    let order: Option<Order> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
    let Some(mut order) = order else {
        return Ok(None);
    };

    let sql = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY product_name");
    order.items = sqlx::query_as(&sql).bind(id).fetch_all(pool).await?;
    Ok(Some(order))
}

pub async fn list_orders(pool: &PgPool, status: Option<OrderStatus>) -> StoreResult<Vec<Order>> {
    let sql = format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE ($1::order_status IS NULL OR status = $1) \
         ORDER BY created_at DESC"
    );
    let mut orders: Vec<Order> = sqlx::query_as(&sql).bind(status).fetch_all(pool).await?;
    if orders.is_empty() {
        return Ok(orders);
    }

    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let sql = format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ANY($1) ORDER BY product_name"
    );
    let items: Vec<OrderItem> = sqlx::query_as(&sql).bind(&ids).fetch_all(pool).await?;

    let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }
    for order in &mut orders {
        order.items = by_order.remove(&order.id).unwrap_or_default();
    }
    Ok(orders)
}

pub async fn count_orders(pool: &PgPool, status: Option<OrderStatus>) -> StoreResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders WHERE ($1::order_status IS NULL OR status = $1)",
    )
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn approved_unverified_count(pool: &PgPool) -> StoreResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders WHERE status = 'approved' AND verified_at IS NULL",
    )
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Conditional status flip plus atomic stock decrements, in one transaction
pub async fn approve_order(
    pool: &PgPool,
    id: Uuid,
    now: DateTime<Utc>,
) -> StoreResult<ApproveOutcome> {
    let mut tx = pool.begin().await?;

    let flipped = sqlx::query(
        "UPDATE orders SET status = 'approved', updated_at = $2 WHERE id = $1 AND status = 'pending'",
    )
    .bind(id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    if flipped.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(ApproveOutcome::default());
    }

    let lines: Vec<(Uuid, i32)> =
        sqlx::query_as("SELECT product_id, quantity FROM order_items WHERE order_id = $1")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

    let mut skipped_products = Vec::new();
    for (product_id, quantity) in lines {
        let result = sqlx::query(
            "UPDATE products SET stock_quantity = stock_quantity - $2 WHERE id = $1",
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            skipped_products.push(product_id);
        }
    }

    tx.commit().await?;
    Ok(ApproveOutcome {
        applied: true,
        skipped_products,
    })
}

pub async fn update_order_review(
    pool: &PgPool,
    id: Uuid,
    guard: ReviewGuard,
    update: &ReviewUpdate,
) -> StoreResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE orders SET
            status = $4, verified_at = $5, notes = $6, updated_at = $7
        WHERE id = $1 AND status = $2 AND (verified_at IS NOT NULL) = $3
        "#,
    )
    .bind(id)
    .bind(guard.status)
    .bind(guard.verified)
    .bind(update.status)
    .bind(update.verified_at)
    .bind(&update.notes)
    .bind(update.updated_at)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Items first, then their orders
pub async fn delete_orders(pool: &PgPool, window: CreatedWindow) -> StoreResult<u64> {
    let mut tx = pool.begin().await?;

    let ids: Vec<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id FROM orders
        WHERE ($1::timestamptz IS NULL OR created_at >= $1)
          AND ($2::timestamptz IS NULL OR created_at < $2)
        "#,
    )
    .bind(window.from)
    .bind(window.until)
    .fetch_all(&mut *tx)
    .await?;

    if ids.is_empty() {
        tx.rollback().await?;
        return Ok(0);
    }

    sqlx::query("DELETE FROM order_items WHERE order_id = ANY($1)")
        .bind(&ids)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM orders WHERE id = ANY($1)")
        .bind(&ids)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(deleted)
}
