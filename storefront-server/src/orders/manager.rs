//! Order lifecycle manager
//!
//! Every transition follows the same shape:
//!
//! 1. load the order (missing → `OrderNotFound`)
//! 2. check the transition against the state machine (no write on refusal)
//! 3. one conditional write, guarded by the state read in step 1
//! 4. reload and return the order
//!
//! A guard mismatch in step 3 means another writer got there first; the
//! caller gets `InvalidOrderTransition` and nothing is changed.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    BulkDeleteRequest, BulkDeleteResult, Order, OrderCreate, OrderItem, OrderStatus, Product,
};
use shared::util::non_blank;
use uuid::Uuid;

use super::bulk_delete::deletion_window;
use super::lifecycle::{OrderAction, OrderState, check_transition};
use crate::db::{DataStore, ReviewGuard, ReviewUpdate};
use crate::error::{ServiceResult, persistence};

pub struct OrderManager {
    store: Arc<dyn DataStore>,
}

fn order_not_found(id: Uuid) -> AppError {
    AppError::new(ErrorCode::OrderNotFound).with_detail("id", id.to_string())
}

fn changed_concurrently(id: Uuid) -> AppError {
    AppError::with_message(
        ErrorCode::InvalidOrderTransition,
        "Order was changed by another request",
    )
    .with_detail("id", id.to_string())
}

fn required(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::required(field));
    }
    Ok(trimmed.to_string())
}

impl OrderManager {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    // ── Checkout ──

    /// Place a pending order; prices and names are snapshotted now
    pub async fn create_order(&self, form: OrderCreate) -> ServiceResult<Order> {
        let customer_name = required(&form.customer_name, "customer_name")?;
        let customer_phone = required(&form.customer_phone, "customer_phone")?;
        if form.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty).into());
        }
        if let Some(line) = form.items.iter().find(|l| l.quantity <= 0) {
            return Err(AppError::new(ErrorCode::InvalidQuantity)
                .with_detail("product_id", line.product_id.to_string())
                .with_detail("quantity", line.quantity)
                .into());
        }

        let ids: Vec<Uuid> = form
            .items
            .iter()
            .map(|l| l.product_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let products: HashMap<Uuid, Product> = self
            .store
            .find_products(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let order_id = Uuid::new_v4();
        let mut items = Vec::with_capacity(form.items.len());
        let mut total = Decimal::ZERO;
        for line in form.items {
            let product = products.get(&line.product_id).ok_or_else(|| {
                AppError::new(ErrorCode::ProductNotFound)
                    .with_detail("product_id", line.product_id.to_string())
            })?;
            if !product.is_active {
                return Err(AppError::new(ErrorCode::ProductInactive)
                    .with_detail("product_id", product.id.to_string())
                    .into());
            }
            total += product.price * Decimal::from(line.quantity);
            items.push(OrderItem {
                id: Uuid::new_v4(),
                order_id,
                product_id: product.id,
                product_name: product.name.clone(),
                quantity: line.quantity,
                selected_color: non_blank(line.selected_color),
                selected_size: non_blank(line.selected_size),
                unit_price: product.price,
            });
        }

        let now = Utc::now();
        let order = Order {
            id: order_id,
            status: OrderStatus::Pending,
            verified_at: None,
            notes: None,
            customer_name,
            customer_phone,
            customer_email: non_blank(form.customer_email),
            customer_address: non_blank(form.customer_address),
            delivery_time: non_blank(form.delivery_time),
            customer_message: non_blank(form.customer_message),
            total_amount: total,
            created_at: now,
            updated_at: now,
            items,
        };
        self.store.insert_order(&order).await.map_err(persistence)?;

        tracing::info!(order_id = %order.id, total = %order.total_amount, items = order.items.len(), "Order placed");
        Ok(order)
    }

    // ── Queries ──

    /// Newest first, with items
    pub async fn list_orders(&self, status: Option<OrderStatus>) -> ServiceResult<Vec<Order>> {
        Ok(self.store.list_orders(status).await?)
    }

    pub async fn get_order(&self, id: Uuid) -> ServiceResult<Order> {
        self.store
            .find_order(id)
            .await?
            .ok_or_else(|| order_not_found(id).into())
    }

    pub async fn approved_unverified_count(&self) -> ServiceResult<i64> {
        Ok(self.store.approved_unverified_count().await?)
    }

    // ── Transitions ──

    /// `pending → approved`, decrementing stock once per item
    pub async fn approve(&self, id: Uuid) -> ServiceResult<Order> {
        let order = self.get_order(id).await?;
        let from = OrderState::from(&order);
        check_transition(from, OrderAction::Approve)?;

        let outcome = self
            .store
            .approve_order(id, Utc::now())
            .await
            .map_err(persistence)?;
        if !outcome.applied {
            return Err(changed_concurrently(id).into());
        }
        for product_id in &outcome.skipped_products {
            tracing::warn!(order_id = %id, product_id = %product_id, "Product missing, stock not decremented");
        }

        tracing::info!(order_id = %id, from = %from.status, to = %OrderStatus::Approved, "Order transition");
        self.get_order(id).await
    }

    /// `pending | approved → rejected`; stock is not restored
    pub async fn reject(&self, id: Uuid) -> ServiceResult<Order> {
        self.review(id, OrderAction::Reject, |order| ReviewUpdate {
            status: OrderStatus::Rejected,
            verified_at: None,
            notes: order.notes.clone(),
            updated_at: Utc::now(),
        })
        .await
    }

    /// Mark an approved order as paid; blank notes are stored as null
    pub async fn verify(&self, id: Uuid, notes: Option<String>) -> ServiceResult<Order> {
        let notes = non_blank(notes);
        self.review(id, OrderAction::Verify, move |_| {
            let now = Utc::now();
            ReviewUpdate {
                status: OrderStatus::Approved,
                verified_at: Some(now),
                notes,
                updated_at: now,
            }
        })
        .await
    }

    /// Clear verification and notes
    pub async fn unverify(&self, id: Uuid) -> ServiceResult<Order> {
        self.review(id, OrderAction::Unverify, |_| ReviewUpdate {
            status: OrderStatus::Approved,
            verified_at: None,
            notes: None,
            updated_at: Utc::now(),
        })
        .await
    }

    async fn review(
        &self,
        id: Uuid,
        action: OrderAction,
        update: impl FnOnce(&Order) -> ReviewUpdate,
    ) -> ServiceResult<Order> {
        let order = self.get_order(id).await?;
        let from = OrderState::from(&order);
        let to = check_transition(from, action)?;

        let update = update(&order);
        let guard = ReviewGuard {
            status: from.status,
            verified: from.verified,
        };
        let applied = self
            .store
            .update_order_review(id, guard, &update)
            .await
            .map_err(persistence)?;
        if !applied {
            return Err(changed_concurrently(id).into());
        }

        tracing::info!(
            order_id = %id,
            action = action.as_str(),
            from = %from.status,
            to = %to.status,
            verified = to.verified,
            "Order transition"
        );
        self.get_order(id).await
    }

    // ── Cleanup ──

    /// Delete orders (and their items) in an inclusive UTC date range
    pub async fn bulk_delete(&self, req: BulkDeleteRequest) -> ServiceResult<BulkDeleteResult> {
        let window = deletion_window(&req)?;
        let deleted = self
            .store
            .delete_orders(window)
            .await
            .map_err(persistence)?;

        if deleted == 0 {
            tracing::info!(?window, "Bulk delete matched no orders");
        } else {
            tracing::warn!(?window, deleted, "Orders bulk deleted");
        }
        Ok(BulkDeleteResult { deleted })
    }
}
