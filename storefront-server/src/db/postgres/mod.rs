//! PostgreSQL-backed [`DataStore`]

mod catalog;
mod orders;
mod revenue;
mod themes;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::error::AppError;
use shared::models::{
    Order, OrderStatus, Product, RevenuePeriod, RevenueRow, Setting, Theme, TopProduct,
    UserThemePreference,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::{
    ApproveOutcome, CreatedWindow, DataStore, ReviewGuard, ReviewUpdate, StoreResult,
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and apply pending migrations
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }
}

#[async_trait]
impl DataStore for PgStore {
    async fn list_themes(&self) -> StoreResult<Vec<Theme>> {
        themes::list_themes(&self.pool, false).await
    }

    async fn list_active_themes(&self) -> StoreResult<Vec<Theme>> {
        themes::list_themes(&self.pool, true).await
    }

    async fn find_theme(&self, id: Uuid) -> StoreResult<Option<Theme>> {
        themes::find_theme(&self.pool, id).await
    }

    async fn find_theme_by_slug(&self, slug: &str) -> StoreResult<Option<Theme>> {
        themes::find_theme_by_slug(&self.pool, slug).await
    }

    async fn insert_theme(&self, theme: &Theme) -> StoreResult<()> {
        themes::insert_theme(&self.pool, theme).await
    }

    async fn update_theme(&self, theme: &Theme) -> StoreResult<()> {
        themes::update_theme(&self.pool, theme).await
    }

    async fn set_theme_active(
        &self,
        id: Uuid,
        is_active: bool,
        now: DateTime<Utc>,
    ) -> StoreResult<Theme> {
        themes::set_theme_active(&self.pool, id, is_active, now).await
    }

    async fn delete_theme(&self, id: Uuid) -> StoreResult<()> {
        themes::delete_theme(&self.pool, id).await
    }

    async fn get_user_theme(&self, user_id: Uuid) -> StoreResult<Option<UserThemePreference>> {
        themes::get_user_theme(&self.pool, user_id).await
    }

    async fn upsert_user_theme(&self, pref: &UserThemePreference) -> StoreResult<()> {
        themes::upsert_user_theme(&self.pool, pref).await
    }

    async fn delete_user_theme(&self, user_id: Uuid) -> StoreResult<()> {
        themes::delete_user_theme(&self.pool, user_id).await
    }

    async fn get_settings(&self, keys: &[&str]) -> StoreResult<Vec<Setting>> {
        catalog::get_settings(&self.pool, keys).await
    }

    async fn upsert_settings(&self, entries: &[Setting]) -> StoreResult<()> {
        catalog::upsert_settings(&self.pool, entries).await
    }

    async fn find_products(&self, ids: &[Uuid]) -> StoreResult<Vec<Product>> {
        catalog::find_products(&self.pool, ids).await
    }

    async fn count_products(&self) -> StoreResult<i64> {
        catalog::count_products(&self.pool).await
    }

    async fn insert_order(&self, order: &Order) -> StoreResult<()> {
        orders::insert_order(&self.pool, order).await
    }

    async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        orders::find_order(&self.pool, id).await
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> StoreResult<Vec<Order>> {
        orders::list_orders(&self.pool, status).await
    }

    async fn count_orders(&self, status: Option<OrderStatus>) -> StoreResult<i64> {
        orders::count_orders(&self.pool, status).await
    }

    async fn approved_unverified_count(&self) -> StoreResult<i64> {
        orders::approved_unverified_count(&self.pool).await
    }

    async fn approve_order(&self, id: Uuid, now: DateTime<Utc>) -> StoreResult<ApproveOutcome> {
        orders::approve_order(&self.pool, id, now).await
    }

    async fn update_order_review(
        &self,
        id: Uuid,
        guard: ReviewGuard,
        update: &ReviewUpdate,
    ) -> StoreResult<bool> {
        orders::update_order_review(&self.pool, id, guard, update).await
    }

    async fn delete_orders(&self, window: CreatedWindow) -> StoreResult<u64> {
        orders::delete_orders(&self.pool, window).await
    }

    async fn revenue_by_period(&self, period: RevenuePeriod) -> StoreResult<Vec<RevenueRow>> {
        revenue::revenue_by_period(&self.pool, period).await
    }

    async fn total_verified_revenue(&self) -> StoreResult<Decimal> {
        revenue::total_verified_revenue(&self.pool).await
    }

    async fn pending_revenue(&self) -> StoreResult<Decimal> {
        revenue::pending_revenue(&self.pool).await
    }

    async fn top_products(&self, limit: i64) -> StoreResult<Vec<TopProduct>> {
        revenue::top_products(&self.pool, limit).await
    }
}
