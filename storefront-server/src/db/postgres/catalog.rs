//! Settings (key/value) and product catalog queries

use shared::models::{Product, Setting};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::StoreResult;

pub async fn get_settings(pool: &PgPool, keys: &[&str]) -> StoreResult<Vec<Setting>> {
    let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    let rows: Vec<Setting> =
        sqlx::query_as("SELECT key, value, updated_at FROM settings WHERE key = ANY($1)")
            .bind(&keys)
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn upsert_settings(pool: &PgPool, entries: &[Setting]) -> StoreResult<()> {
    let mut tx = pool.begin().await?;
    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (key)
            DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&entry.key)
        .bind(&entry.value)
        .bind(entry.updated_at)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn find_products(pool: &PgPool, ids: &[Uuid]) -> StoreResult<Vec<Product>> {
    let rows: Vec<Product> = sqlx::query_as(
        r#"
        SELECT id, name, price, stock_quantity, image_url, is_active, created_at
        FROM products
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_products(pool: &PgPool) -> StoreResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
