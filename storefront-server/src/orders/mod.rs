//! Orders: checkout, review lifecycle, revenue and cleanup

pub mod bulk_delete;
pub mod lifecycle;
pub mod manager;
pub mod revenue;

pub use lifecycle::{OrderAction, OrderState};
pub use manager::OrderManager;
pub use revenue::RevenueReports;
