//! In-process [`DataStore`]
//!
//! Same contract as the PostgreSQL store, kept in maps behind one lock so
//! every trait call is atomic. Used by tests and by `STORE_BACKEND=memory`.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::models::{
    Order, OrderStatus, Product, RevenuePeriod, RevenueRow, Setting, Theme, TopProduct,
    UserThemePreference,
};
use uuid::Uuid;

use super::{
    ApproveOutcome, CreatedWindow, DataStore, ReviewGuard, ReviewUpdate, StoreError, StoreResult,
};
use crate::orders::revenue::period_bucket;

#[derive(Default)]
struct Tables {
    themes: HashMap<Uuid, Theme>,
    user_themes: HashMap<Uuid, UserThemePreference>,
    settings: HashMap<String, Setting>,
    products: HashMap<Uuid, Product>,
    orders: HashMap<Uuid, Order>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail with a database error
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail with a database error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed or replace a catalog product
    pub fn put_product(&self, product: Product) {
        self.tables.write().products.insert(product.id, product);
    }

    pub fn product(&self, id: Uuid) -> Option<Product> {
        self.tables.read().products.get(&id).cloned()
    }

    pub fn remove_product(&self, id: Uuid) {
        self.tables.write().products.remove(&id);
    }

    fn check_read(&self) -> StoreResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Database("read rejected".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database("write rejected".into()));
        }
        Ok(())
    }
}

fn sorted_themes<'a>(themes: impl Iterator<Item = &'a Theme>) -> Vec<Theme> {
    let mut list: Vec<Theme> = themes.cloned().collect();
    list.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
    list
}

fn slug_taken(tables: &Tables, slug: &str, except: Uuid) -> bool {
    tables
        .themes
        .values()
        .any(|t| t.slug == slug && t.id != except)
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn list_themes(&self) -> StoreResult<Vec<Theme>> {
        self.check_read()?;
        Ok(sorted_themes(self.tables.read().themes.values()))
    }

    async fn list_active_themes(&self) -> StoreResult<Vec<Theme>> {
        self.check_read()?;
        Ok(sorted_themes(
            self.tables.read().themes.values().filter(|t| t.is_active),
        ))
    }

    async fn find_theme(&self, id: Uuid) -> StoreResult<Option<Theme>> {
        self.check_read()?;
        Ok(self.tables.read().themes.get(&id).cloned())
    }

    async fn find_theme_by_slug(&self, slug: &str) -> StoreResult<Option<Theme>> {
        self.check_read()?;
        Ok(self
            .tables
            .read()
            .themes
            .values()
            .find(|t| t.slug == slug)
            .cloned())
    }

    async fn insert_theme(&self, theme: &Theme) -> StoreResult<()> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if slug_taken(&tables, &theme.slug, theme.id) {
            return Err(StoreError::Conflict(format!("slug '{}' exists", theme.slug)));
        }
        tables.themes.insert(theme.id, theme.clone());
        Ok(())
    }

    async fn update_theme(&self, theme: &Theme) -> StoreResult<()> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if !tables.themes.contains_key(&theme.id) {
            return Err(StoreError::NotFound(format!("theme {}", theme.id)));
        }
        if slug_taken(&tables, &theme.slug, theme.id) {
            return Err(StoreError::Conflict(format!("slug '{}' exists", theme.slug)));
        }
        tables.themes.insert(theme.id, theme.clone());
        Ok(())
    }

    async fn set_theme_active(
        &self,
        id: Uuid,
        is_active: bool,
        now: DateTime<Utc>,
    ) -> StoreResult<Theme> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let theme = tables
            .themes
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("theme {id}")))?;
        theme.is_active = is_active;
        theme.updated_at = now;
        Ok(theme.clone())
    }

    async fn delete_theme(&self, id: Uuid) -> StoreResult<()> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if tables.themes.remove(&id).is_none() {
            return Err(StoreError::NotFound(format!("theme {id}")));
        }
        tables.user_themes.retain(|_, pref| pref.theme_id != id);
        Ok(())
    }

    async fn get_user_theme(&self, user_id: Uuid) -> StoreResult<Option<UserThemePreference>> {
        self.check_read()?;
        Ok(self.tables.read().user_themes.get(&user_id).cloned())
    }

    async fn upsert_user_theme(&self, pref: &UserThemePreference) -> StoreResult<()> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if !tables.themes.contains_key(&pref.theme_id) {
            return Err(StoreError::Database(format!(
                "theme {} violates foreign key",
                pref.theme_id
            )));
        }
        tables.user_themes.insert(pref.user_id, pref.clone());
        Ok(())
    }

    async fn delete_user_theme(&self, user_id: Uuid) -> StoreResult<()> {
        self.check_write()?;
        self.tables.write().user_themes.remove(&user_id);
        Ok(())
    }

    async fn get_settings(&self, keys: &[&str]) -> StoreResult<Vec<Setting>> {
        self.check_read()?;
        let tables = self.tables.read();
        Ok(keys
            .iter()
            .filter_map(|k| tables.settings.get(*k).cloned())
            .collect())
    }

    async fn upsert_settings(&self, entries: &[Setting]) -> StoreResult<()> {
        self.check_write()?;
        let mut tables = self.tables.write();
        for entry in entries {
            tables.settings.insert(entry.key.clone(), entry.clone());
        }
        Ok(())
    }

    async fn find_products(&self, ids: &[Uuid]) -> StoreResult<Vec<Product>> {
        self.check_read()?;
        let tables = self.tables.read();
        Ok(ids
            .iter()
            .filter_map(|id| tables.products.get(id).cloned())
            .collect())
    }

    async fn count_products(&self) -> StoreResult<i64> {
        self.check_read()?;
        Ok(self.tables.read().products.len() as i64)
    }

    async fn insert_order(&self, order: &Order) -> StoreResult<()> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if tables.orders.contains_key(&order.id) {
            return Err(StoreError::Conflict(format!("order {} exists", order.id)));
        }
        tables.orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        self.check_read()?;
        Ok(self.tables.read().orders.get(&id).cloned())
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> StoreResult<Vec<Order>> {
        self.check_read()?;
        let mut orders: Vec<Order> = self
            .tables
            .read()
            .orders
            .values()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn count_orders(&self, status: Option<OrderStatus>) -> StoreResult<i64> {
        self.check_read()?;
        Ok(self
            .tables
            .read()
            .orders
            .values()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .count() as i64)
    }

    async fn approved_unverified_count(&self) -> StoreResult<i64> {
        self.check_read()?;
        Ok(self
            .tables
            .read()
            .orders
            .values()
            .filter(|o| o.status == OrderStatus::Approved && !o.is_verified())
            .count() as i64)
    }

    async fn approve_order(&self, id: Uuid, now: DateTime<Utc>) -> StoreResult<ApproveOutcome> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let Tables {
            orders, products, ..
        } = &mut *tables;

        let Some(order) = orders.get_mut(&id) else {
            return Ok(ApproveOutcome::default());
        };
        if order.status != OrderStatus::Pending {
            return Ok(ApproveOutcome::default());
        }

        // New stock levels are computed up front so an out-of-range value
        // aborts before the order or any product is touched.
        let mut new_stock: HashMap<Uuid, i32> = HashMap::new();
        let mut skipped_products = Vec::new();
        for item in &order.items {
            let Some(product) = products.get(&item.product_id) else {
                skipped_products.push(item.product_id);
                continue;
            };
            let current = new_stock
                .get(&item.product_id)
                .copied()
                .unwrap_or(product.stock_quantity);
            let next = current.checked_sub(item.quantity).ok_or_else(|| {
                StoreError::Database(format!(
                    "stock_quantity out of range for product {}",
                    item.product_id
                ))
            })?;
            new_stock.insert(item.product_id, next);
        }

        for (product_id, stock) in new_stock {
            if let Some(product) = products.get_mut(&product_id) {
                product.stock_quantity = stock;
            }
        }
        order.status = OrderStatus::Approved;
        order.updated_at = now;

        Ok(ApproveOutcome {
            applied: true,
            skipped_products,
        })
    }

    async fn update_order_review(
        &self,
        id: Uuid,
        guard: ReviewGuard,
        update: &ReviewUpdate,
    ) -> StoreResult<bool> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let Some(order) = tables.orders.get_mut(&id) else {
            return Ok(false);
        };
        if order.status != guard.status || order.is_verified() != guard.verified {
            return Ok(false);
        }
        order.status = update.status;
        order.verified_at = update.verified_at;
        order.notes = update.notes.clone();
        order.updated_at = update.updated_at;
        Ok(true)
    }

    async fn delete_orders(&self, window: CreatedWindow) -> StoreResult<u64> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let before = tables.orders.len();
        tables.orders.retain(|_, o| !window.contains(o.created_at));
        Ok((before - tables.orders.len()) as u64)
    }

    async fn revenue_by_period(&self, period: RevenuePeriod) -> StoreResult<Vec<RevenueRow>> {
        self.check_read()?;
        let tables = self.tables.read();

        // keyed by bucket start so iteration is oldest first
        let mut buckets: BTreeMap<chrono::NaiveDate, RevenueRow> = BTreeMap::new();
        for order in tables
            .orders
            .values()
            .filter(|o| o.status == OrderStatus::Approved)
        {
            let (start, label) = period_bucket(order.created_at, period);
            let row = buckets.entry(start).or_insert_with(|| RevenueRow {
                period: label,
                revenue: Decimal::ZERO,
                order_count: 0,
                verified_count: 0,
            });
            row.order_count += 1;
            if order.is_verified() {
                row.verified_count += 1;
                row.revenue += order.total_amount;
            }
        }
        Ok(buckets.into_values().collect())
    }

    async fn total_verified_revenue(&self) -> StoreResult<Decimal> {
        self.check_read()?;
        Ok(self
            .tables
            .read()
            .orders
            .values()
            .filter(|o| o.status == OrderStatus::Approved && o.is_verified())
            .map(|o| o.total_amount)
            .sum())
    }

    async fn pending_revenue(&self) -> StoreResult<Decimal> {
        self.check_read()?;
        Ok(self
            .tables
            .read()
            .orders
            .values()
            .filter(|o| o.status == OrderStatus::Approved && !o.is_verified())
            .map(|o| o.total_amount)
            .sum())
    }

    async fn top_products(&self, limit: i64) -> StoreResult<Vec<TopProduct>> {
        self.check_read()?;
        let tables = self.tables.read();
        let mut totals: HashMap<Uuid, TopProduct> = HashMap::new();
        for item in tables.orders.values().flat_map(|o| o.items.iter()) {
            let entry = totals.entry(item.product_id).or_insert_with(|| TopProduct {
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                quantity: 0,
            });
            entry.quantity += i64::from(item.quantity);
        }
        let mut list: Vec<TopProduct> = totals.into_values().collect();
        list.sort_by(|a, b| {
            b.quantity
                .cmp(&a.quantity)
                .then_with(|| a.product_name.cmp(&b.product_name))
        });
        list.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(list)
    }
}
