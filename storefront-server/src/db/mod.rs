//! Database access layer
//!
//! Services talk to the hosted database through [`DataStore`]. Two
//! implementations exist: [`PgStore`] (sqlx / PostgreSQL, production) and
//! [`MemoryStore`] (in-process, used by tests and `STORE_BACKEND=memory`).

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{
    Order, OrderStatus, Product, RevenuePeriod, RevenueRow, Setting, Theme, TopProduct,
    UserThemePreference,
};
use thiserror::Error;
use uuid::Uuid;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound(err.to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(db_err.message().to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Serialization(err.to_string())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of the approve unit of work
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApproveOutcome {
    /// False when the order was no longer pending; nothing was written
    pub applied: bool,
    /// Products referenced by items that no longer exist (no stock change)
    pub skipped_products: Vec<Uuid>,
}

/// Review fields written by reject / verify / unverify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub status: OrderStatus,
    pub verified_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Precondition for a review update: the state the order was read in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewGuard {
    pub status: OrderStatus,
    pub verified: bool,
}

/// Half-open creation window `[from, until)`; `None` leaves a side unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreatedWindow {
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl CreatedWindow {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.until.is_none()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.until.is_none_or(|until| at < until)
    }
}

/// Remote data store seam
///
/// Read methods return `Ok(None)` / empty collections for missing rows;
/// targeted mutations on a missing row return [`StoreError::NotFound`].
#[async_trait]
pub trait DataStore: Send + Sync {
    // ── Themes ──

    /// All themes ordered by `sort_order`
    async fn list_themes(&self) -> StoreResult<Vec<Theme>>;
    /// Active themes ordered by `sort_order`
    async fn list_active_themes(&self) -> StoreResult<Vec<Theme>>;
    async fn find_theme(&self, id: Uuid) -> StoreResult<Option<Theme>>;
    async fn find_theme_by_slug(&self, slug: &str) -> StoreResult<Option<Theme>>;
    async fn insert_theme(&self, theme: &Theme) -> StoreResult<()>;
    async fn update_theme(&self, theme: &Theme) -> StoreResult<()>;
    async fn set_theme_active(
        &self,
        id: Uuid,
        is_active: bool,
        now: DateTime<Utc>,
    ) -> StoreResult<Theme>;
    async fn delete_theme(&self, id: Uuid) -> StoreResult<()>;

    // ── Per-user theme selection ──

    async fn get_user_theme(&self, user_id: Uuid) -> StoreResult<Option<UserThemePreference>>;
    /// Insert or replace the single row for `pref.user_id`
    async fn upsert_user_theme(&self, pref: &UserThemePreference) -> StoreResult<()>;
    async fn delete_user_theme(&self, user_id: Uuid) -> StoreResult<()>;

    // ── Settings ──

    async fn get_settings(&self, keys: &[&str]) -> StoreResult<Vec<Setting>>;
    /// Upsert every entry by key in one call
    async fn upsert_settings(&self, entries: &[Setting]) -> StoreResult<()>;

    // ── Products ──

    async fn find_products(&self, ids: &[Uuid]) -> StoreResult<Vec<Product>>;
    async fn count_products(&self) -> StoreResult<i64>;

    // ── Orders ──

    /// Insert an order together with its items
    async fn insert_order(&self, order: &Order) -> StoreResult<()>;
    /// Order with its items
    async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>>;
    /// Newest first, with items
    async fn list_orders(&self, status: Option<OrderStatus>) -> StoreResult<Vec<Order>>;
    async fn count_orders(&self, status: Option<OrderStatus>) -> StoreResult<i64>;
    async fn approved_unverified_count(&self) -> StoreResult<i64>;
    /// `pending → approved` plus one stock decrement per item, all or nothing
    async fn approve_order(&self, id: Uuid, now: DateTime<Utc>) -> StoreResult<ApproveOutcome>;
    /// Conditional update; returns false if the order no longer matches `guard`
    async fn update_order_review(
        &self,
        id: Uuid,
        guard: ReviewGuard,
        update: &ReviewUpdate,
    ) -> StoreResult<bool>;
    /// Delete orders created inside `window` and their items; returns orders removed
    async fn delete_orders(&self, window: CreatedWindow) -> StoreResult<u64>;

    // ── Aggregation ──

    async fn revenue_by_period(&self, period: RevenuePeriod) -> StoreResult<Vec<RevenueRow>>;
    async fn total_verified_revenue(&self) -> StoreResult<Decimal>;
    async fn pending_revenue(&self) -> StoreResult<Decimal>;
    async fn top_products(&self, limit: i64) -> StoreResult<Vec<TopProduct>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_created_window_contains() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let window = CreatedWindow {
            from: Some(from),
            until: Some(until),
        };
        assert!(window.contains(from));
        assert!(window.contains(until - chrono::Duration::microseconds(1)));
        assert!(!window.contains(until));
        assert!(!window.contains(from - chrono::Duration::seconds(1)));
        assert!(CreatedWindow::default().contains(from));
        assert!(CreatedWindow::default().is_unbounded());
    }
}
