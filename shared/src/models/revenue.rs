//! Revenue reporting rows

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bucket size for revenue reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenuePeriod {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl RevenuePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

/// One bucket of `revenue_by_period`
///
/// `revenue` sums verified orders only; `order_count` counts approved orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RevenueRow {
    pub period: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    pub order_count: i64,
    pub verified_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub verified_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub pending_revenue: Decimal,
    pub approved_unverified_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TopProduct {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i64,
}

/// Back-office landing page figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_orders: i64,
    pub total_products: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub verified_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub pending_revenue: Decimal,
    pub approved_orders: i64,
    pub top_products: Vec<TopProduct>,
}
