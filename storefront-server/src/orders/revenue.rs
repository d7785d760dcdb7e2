//! Revenue reporting
//!
//! Verified revenue counts approved orders with `verified_at` set; pending
//! revenue counts approved orders still awaiting verification. Rejected
//! orders count toward neither.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use shared::models::{DashboardStats, OrderStatus, RevenuePeriod, RevenueRow, RevenueSummary};

use crate::db::DataStore;
use crate::error::ServiceResult;

const TOP_PRODUCTS_LIMIT: i64 = 5;

/// Bucket start (UTC) and label for `at`
///
/// Labels: `2024-W05` (ISO week), `2024-01`, `2024-Q1`, `2024`.
pub fn period_bucket(at: DateTime<Utc>, period: RevenuePeriod) -> (NaiveDate, String) {
    let date = at.date_naive();
    match period {
        RevenuePeriod::Week => {
            let iso = date.iso_week();
            let monday = date - chrono::Duration::days(i64::from(date.weekday().num_days_from_monday()));
            (monday, format!("{}-W{:02}", iso.year(), iso.week()))
        }
        RevenuePeriod::Month => (
            date.with_day(1).unwrap_or(date),
            format!("{}-{:02}", date.year(), date.month()),
        ),
        RevenuePeriod::Quarter => {
            let quarter = date.month0() / 3 + 1;
            let start = NaiveDate::from_ymd_opt(date.year(), (quarter - 1) * 3 + 1, 1).unwrap_or(date);
            (start, format!("{}-Q{quarter}", date.year()))
        }
        RevenuePeriod::Year => (
            NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
            format!("{}", date.year()),
        ),
    }
}

pub struct RevenueReports {
    store: Arc<dyn DataStore>,
}

impl RevenueReports {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Oldest bucket first
    pub async fn revenue_by_period(&self, period: RevenuePeriod) -> ServiceResult<Vec<RevenueRow>> {
        Ok(self.store.revenue_by_period(period).await?)
    }

    pub async fn summary(&self) -> ServiceResult<RevenueSummary> {
        let (verified_revenue, pending_revenue, approved_unverified_count) = tokio::try_join!(
            self.store.total_verified_revenue(),
            self.store.pending_revenue(),
            self.store.approved_unverified_count(),
        )?;
        Ok(RevenueSummary {
            verified_revenue,
            pending_revenue,
            approved_unverified_count,
        })
    }

    pub async fn dashboard(&self) -> ServiceResult<DashboardStats> {
        let (total_orders, total_products, verified_revenue, pending_revenue, approved_orders, top_products) =
            tokio::try_join!(
                self.store.count_orders(None),
                self.store.count_products(),
                self.store.total_verified_revenue(),
                self.store.pending_revenue(),
                self.store.count_orders(Some(OrderStatus::Approved)),
                self.store.top_products(TOP_PRODUCTS_LIMIT),
            )?;
        Ok(DashboardStats {
            total_orders,
            total_products,
            verified_revenue,
            pending_revenue,
            approved_orders,
            top_products,
        })
    }
}
