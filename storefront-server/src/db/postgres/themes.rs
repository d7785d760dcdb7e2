//! Theme and per-user theme selection queries

use chrono::{DateTime, Utc};
use shared::models::{Theme, UserThemePreference};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::db::{StoreError, StoreResult};

const THEME_COLUMNS: &str = "id, slug, name, description, category, primary_color, \
     css_variables, is_active, is_seasonal, sort_order, created_at, updated_at";

pub async fn list_themes(pool: &PgPool, active_only: bool) -> StoreResult<Vec<Theme>> {
    let sql = format!(
        "SELECT {THEME_COLUMNS} FROM themes WHERE ($1 = FALSE OR is_active) \
         ORDER BY sort_order ASC, name ASC"
    );
    let rows: Vec<Theme> = sqlx::query_as(&sql)
        .bind(active_only)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_theme(pool: &PgPool, id: Uuid) -> StoreResult<Option<Theme>> {
    let sql = format!("SELECT {THEME_COLUMNS} FROM themes WHERE id = $1");
    let row: Option<Theme> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
    Ok(row)
}

pub async fn find_theme_by_slug(pool: &PgPool, slug: &str) -> StoreResult<Option<Theme>> {
    let sql = format!("SELECT {THEME_COLUMNS} FROM themes WHERE slug = $1");
    let row: Option<Theme> = sqlx::query_as(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert_theme(pool: &PgPool, theme: &Theme) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO themes (
            id, slug, name, description, category, primary_color,
            css_variables, is_active, is_seasonal, sort_order,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(theme.id)
    .bind(&theme.slug)
    .bind(&theme.name)
    .bind(&theme.description)
    .bind(theme.category)
    .bind(&theme.primary_color)
    .bind(Json(&theme.css_variables))
    .bind(theme.is_active)
    .bind(theme.is_seasonal)
    .bind(theme.sort_order)
    .bind(theme.created_at)
    .bind(theme.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update_theme(pool: &PgPool, theme: &Theme) -> StoreResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE themes SET
            slug = $2, name = $3, description = $4, category = $5,
            primary_color = $6, css_variables = $7, is_active = $8,
            is_seasonal = $9, sort_order = $10, updated_at = $11
        WHERE id = $1
        "#,
    )
    .bind(theme.id)
    .bind(&theme.slug)
    .bind(&theme.name)
    .bind(&theme.description)
    .bind(theme.category)
    .bind(&theme.primary_color)
    .bind(Json(&theme.css_variables))
    .bind(theme.is_active)
    .bind(theme.is_seasonal)
    .bind(theme.sort_order)
    .bind(theme.updated_at)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("theme {}", theme.id)));
    }
    Ok(())
}

pub async fn set_theme_active(
    pool: &PgPool,
    id: Uuid,
    is_active: bool,
    now: DateTime<Utc>,
) -> StoreResult<Theme> {
    let sql = format!(
        "UPDATE themes SET is_active = $2, updated_at = $3 WHERE id = $1 RETURNING {THEME_COLUMNS}"
    );
    let row: Option<Theme> = sqlx::query_as(&sql)
        .bind(id)
        .bind(is_active)
        .bind(now)
        .fetch_optional(pool)
        .await?;
    row.ok_or_else(|| StoreError::NotFound(format!("theme {id}")))
}

pub async fn delete_theme(pool: &PgPool, id: Uuid) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM themes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("theme {id}")));
    }
    Ok(())
}

// ── Per-user selection ──

pub async fn get_user_theme(
    pool: &PgPool,
    user_id: Uuid,
) -> StoreResult<Option<UserThemePreference>> {
    let row: Option<UserThemePreference> = sqlx::query_as(
        "SELECT user_id, theme_id, updated_at FROM user_themes WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn upsert_user_theme(pool: &PgPool, pref: &UserThemePreference) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO user_themes (user_id, theme_id, updated_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id)
        DO UPDATE SET theme_id = EXCLUDED.theme_id, updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(pref.user_id)
    .bind(pref.theme_id)
    .bind(pref.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_user_theme(pool: &PgPool, user_id: Uuid) -> StoreResult<()> {
    sqlx::query("DELETE FROM user_themes WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
