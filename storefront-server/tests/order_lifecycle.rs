mod common;

use chrono::{TimeZone, Utc};
use common::{code, memory_state, seed_order, seed_product};
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{
    BulkDeleteConfirm, BulkDeleteRequest, OrderCreate, OrderLineInput, OrderStatus, RevenuePeriod,
};
use storefront_server::DataStore;
use uuid::Uuid;

fn line(product_id: Uuid, quantity: i32) -> OrderLineInput {
    OrderLineInput {
        product_id,
        quantity,
        selected_color: None,
        selected_size: None,
    }
}

fn checkout(items: Vec<OrderLineInput>) -> OrderCreate {
    OrderCreate {
        customer_name: "Nguyễn Văn A".into(),
        customer_phone: "0901234567".into(),
        customer_email: Some("  ".into()),
        customer_address: Some(" 12 Lê Lợi ".into()),
        delivery_time: None,
        customer_message: None,
        items,
    }
}

fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> BulkDeleteRequest {
    BulkDeleteRequest {
        start_date: chrono::NaiveDate::from_ymd_opt(start.0, start.1, start.2),
        end_date: chrono::NaiveDate::from_ymd_opt(end.0, end.1, end.2),
        confirm: Some(BulkDeleteConfirm::Range),
    }
}

#[tokio::test]
async fn test_checkout_snapshots_prices() {
    let (store, state) = memory_state();
    let cake = seed_product(&store, "Bánh kem", Decimal::new(1050, 2), 5);
    let tea = seed_product(&store, "Trà", Decimal::new(300, 2), 10);

    let mut form = checkout(vec![line(cake.id, 2), line(tea.id, 3)]);
    form.items[0].selected_size = Some(" L ".into());
    let order = state.orders.create_order(form).await.unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert!(!order.is_verified());
    assert_eq!(order.total_amount, Decimal::new(3000, 2));
    assert_eq!(order.customer_email, None);
    assert_eq!(order.customer_address.as_deref(), Some("12 Lê Lợi"));
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].product_name, "Bánh kem");
    assert_eq!(order.items[0].unit_price, Decimal::new(1050, 2));
    assert_eq!(order.items[0].selected_size.as_deref(), Some("L"));

    let stored = state.orders.get_order(order.id).await.unwrap();
    assert_eq!(stored, order);
    // stock only moves on approval
    assert_eq!(store.product(cake.id).unwrap().stock_quantity, 5);
}

#[tokio::test]
async fn test_checkout_validation() {
    let (store, state) = memory_state();
    let cake = seed_product(&store, "Bánh kem", Decimal::new(1000, 2), 5);
    let mut hidden = common::product("Hidden", Decimal::ONE, 1);
    hidden.is_active = false;
    store.put_product(hidden.clone());

    let mut blank_name = checkout(vec![line(cake.id, 1)]);
    blank_name.customer_name = "  ".into();
    let err = state.orders.create_order(blank_name).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::RequiredField);

    let mut blank_phone = checkout(vec![line(cake.id, 1)]);
    blank_phone.customer_phone = String::new();
    let err = state.orders.create_order(blank_phone).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::RequiredField);

    let err = state.orders.create_order(checkout(vec![])).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::OrderEmpty);

    let err = state
        .orders
        .create_order(checkout(vec![line(cake.id, 0)]))
        .await
        .unwrap_err();
    assert_eq!(code(err), ErrorCode::InvalidQuantity);

    let err = state
        .orders
        .create_order(checkout(vec![line(Uuid::new_v4(), 1)]))
        .await
        .unwrap_err();
    assert_eq!(code(err), ErrorCode::ProductNotFound);

    let err = state
        .orders
        .create_order(checkout(vec![line(hidden.id, 1)]))
        .await
        .unwrap_err();
    assert_eq!(code(err), ErrorCode::ProductInactive);

    assert_eq!(store.count_orders(None).await.unwrap(), 0);
}

#[tokio::test]
async fn test_approval_decrements_stock_once() {
    let (store, state) = memory_state();
    let cake = seed_product(&store, "Bánh kem", Decimal::new(1000, 2), 5);
    let tea = seed_product(&store, "Trà", Decimal::new(200, 2), 10);
    let order = state
        .orders
        .create_order(checkout(vec![line(cake.id, 2), line(tea.id, 3)]))
        .await
        .unwrap();

    let approved = state.orders.approve(order.id).await.unwrap();
    assert_eq!(approved.status, OrderStatus::Approved);
    assert_eq!(store.product(cake.id).unwrap().stock_quantity, 3);
    assert_eq!(store.product(tea.id).unwrap().stock_quantity, 7);

    let err = state.orders.approve(order.id).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::OrderAlreadyApproved);

    state.orders.reject(order.id).await.unwrap();
    let err = state.orders.approve(order.id).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::InvalidOrderTransition);

    // rejection does not restore stock, re-approval is refused
    assert_eq!(store.product(cake.id).unwrap().stock_quantity, 3);
    assert_eq!(store.product(tea.id).unwrap().stock_quantity, 7);
}

#[tokio::test]
async fn test_approval_skips_deleted_products() {
    let (store, state) = memory_state();
    let cake = seed_product(&store, "Bánh kem", Decimal::new(1000, 2), 5);
    let tea = seed_product(&store, "Trà", Decimal::new(200, 2), 10);
    let order = state
        .orders
        .create_order(checkout(vec![line(cake.id, 1), line(tea.id, 1)]))
        .await
        .unwrap();
    store.remove_product(tea.id);

    let approved = state.orders.approve(order.id).await.unwrap();
    assert_eq!(approved.status, OrderStatus::Approved);
    assert_eq!(store.product(cake.id).unwrap().stock_quantity, 4);
}

#[tokio::test]
async fn test_failed_approval_changes_nothing() {
    let (store, state) = memory_state();
    let cake = seed_product(&store, "Bánh kem", Decimal::new(1000, 2), 5);
    let order = state
        .orders
        .create_order(checkout(vec![line(cake.id, 2)]))
        .await
        .unwrap();

    store.set_fail_writes(true);
    let err = state.orders.approve(order.id).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::PersistenceFailed);

    store.set_fail_writes(false);
    assert_eq!(
        state.orders.get_order(order.id).await.unwrap().status,
        OrderStatus::Pending
    );
    assert_eq!(store.product(cake.id).unwrap().stock_quantity, 5);
}

#[tokio::test]
async fn test_stock_out_of_range_aborts_approval() {
    let (store, state) = memory_state();
    let cake = seed_product(&store, "Bánh kem", Decimal::new(1000, 2), -10);
    let candle = seed_product(&store, "Nến", Decimal::new(100, 2), 3);
    let order = state
        .orders
        .create_order(checkout(vec![line(candle.id, 1), line(cake.id, i32::MAX)]))
        .await
        .unwrap();

    let err = state.orders.approve(order.id).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::PersistenceFailed);

    assert_eq!(
        state.orders.get_order(order.id).await.unwrap().status,
        OrderStatus::Pending
    );
    assert_eq!(store.product(cake.id).unwrap().stock_quantity, -10);
    assert_eq!(store.product(candle.id).unwrap().stock_quantity, 3);
}

#[tokio::test]
async fn test_repeated_product_lines_decrement_together() {
    let (store, state) = memory_state();
    let cake = seed_product(&store, "Bánh kem", Decimal::new(1000, 2), 5);
    let order = state
        .orders
        .create_order(checkout(vec![line(cake.id, 2), line(cake.id, 1)]))
        .await
        .unwrap();

    state.orders.approve(order.id).await.unwrap();
    assert_eq!(store.product(cake.id).unwrap().stock_quantity, 2);
}

#[tokio::test]
async fn test_verification_cycle() {
    let (store, state) = memory_state();
    let cake = seed_product(&store, "Bánh kem", Decimal::new(1000, 2), 5);
    let order = state
        .orders
        .create_order(checkout(vec![line(cake.id, 1)]))
        .await
        .unwrap();

    let err = state.orders.verify(order.id, None).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::OrderNotApproved);
    let err = state.orders.unverify(order.id).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::OrderNotVerified);

    state.orders.approve(order.id).await.unwrap();
    assert_eq!(state.orders.approved_unverified_count().await.unwrap(), 1);

    let verified = state
        .orders
        .verify(order.id, Some("  paid by transfer ".into()))
        .await
        .unwrap();
    assert!(verified.is_verified());
    assert_eq!(verified.notes.as_deref(), Some("paid by transfer"));
    assert_eq!(state.orders.approved_unverified_count().await.unwrap(), 0);

    let err = state.orders.verify(order.id, None).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::OrderAlreadyVerified);

    let unverified = state.orders.unverify(order.id).await.unwrap();
    assert!(!unverified.is_verified());
    assert_eq!(unverified.notes, None);
    assert_eq!(unverified.status, OrderStatus::Approved);

    let err = state.orders.unverify(order.id).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::OrderNotVerified);
}

#[tokio::test]
async fn test_reject_clears_verification() {
    let (store, state) = memory_state();
    let cake = seed_product(&store, "Bánh kem", Decimal::new(1000, 2), 5);
    let order = state
        .orders
        .create_order(checkout(vec![line(cake.id, 1)]))
        .await
        .unwrap();
    state.orders.approve(order.id).await.unwrap();
    state
        .orders
        .verify(order.id, Some("cash".into()))
        .await
        .unwrap();

    let rejected = state.orders.reject(order.id).await.unwrap();
    assert_eq!(rejected.status, OrderStatus::Rejected);
    assert!(!rejected.is_verified());
    assert_eq!(rejected.notes.as_deref(), Some("cash"));

    let err = state.orders.verify(order.id, None).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::InvalidOrderTransition);
    let err = state.orders.reject(order.id).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::InvalidOrderTransition);
}

#[tokio::test]
async fn test_missing_order() {
    let (_store, state) = memory_state();
    let err = state.orders.approve(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::OrderNotFound);
    let err = state.orders.get_order(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::OrderNotFound);
}

#[tokio::test]
async fn test_list_orders_filters_and_sorts() {
    let (store, state) = memory_state();
    let older = seed_order(
        &store,
        Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap(),
        OrderStatus::Pending,
        false,
        Decimal::TEN,
    )
    .await;
    let newer = seed_order(
        &store,
        Utc.with_ymd_and_hms(2024, 1, 6, 8, 0, 0).unwrap(),
        OrderStatus::Pending,
        false,
        Decimal::TEN,
    )
    .await;
    seed_order(
        &store,
        Utc.with_ymd_and_hms(2024, 1, 7, 8, 0, 0).unwrap(),
        OrderStatus::Rejected,
        false,
        Decimal::TEN,
    )
    .await;

    let pending = state
        .orders
        .list_orders(Some(OrderStatus::Pending))
        .await
        .unwrap();
    let ids: Vec<Uuid> = pending.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert_eq!(state.orders.list_orders(None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_revenue_counts_only_approved_orders() {
    let (store, state) = memory_state();
    let jan = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    let feb = Utc.with_ymd_and_hms(2024, 2, 3, 10, 0, 0).unwrap();
    seed_order(&store, jan, OrderStatus::Approved, true, Decimal::new(100, 0)).await;
    seed_order(&store, jan, OrderStatus::Approved, false, Decimal::new(40, 0)).await;
    seed_order(&store, jan, OrderStatus::Pending, false, Decimal::new(999, 0)).await;
    seed_order(&store, feb, OrderStatus::Rejected, false, Decimal::new(50, 0)).await;
    seed_order(&store, feb, OrderStatus::Approved, true, Decimal::new(25, 0)).await;

    let summary = state.revenue.summary().await.unwrap();
    assert_eq!(summary.verified_revenue, Decimal::new(125, 0));
    assert_eq!(summary.pending_revenue, Decimal::new(40, 0));
    assert_eq!(summary.approved_unverified_count, 1);

    let rows = state
        .revenue
        .revenue_by_period(RevenuePeriod::Month)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].period, "2024-01");
    assert_eq!(rows[0].revenue, Decimal::new(100, 0));
    assert_eq!(rows[0].order_count, 2);
    assert_eq!(rows[0].verified_count, 1);
    assert_eq!(rows[1].period, "2024-02");
    assert_eq!(rows[1].revenue, Decimal::new(25, 0));

    let quarters = state
        .revenue
        .revenue_by_period(RevenuePeriod::Quarter)
        .await
        .unwrap();
    assert_eq!(quarters.len(), 1);
    assert_eq!(quarters[0].period, "2024-Q1");
    assert_eq!(quarters[0].revenue, Decimal::new(125, 0));
}

#[tokio::test]
async fn test_dashboard_top_products() {
    let (store, state) = memory_state();
    let cake = seed_product(&store, "Bánh kem", Decimal::new(1000, 2), 50);
    let tea = seed_product(&store, "Trà", Decimal::new(200, 2), 50);
    state
        .orders
        .create_order(checkout(vec![line(cake.id, 2), line(tea.id, 5)]))
        .await
        .unwrap();
    let second = state
        .orders
        .create_order(checkout(vec![line(cake.id, 1)]))
        .await
        .unwrap();
    state.orders.approve(second.id).await.unwrap();

    let stats = state.revenue.dashboard().await.unwrap();
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_products, 2);
    assert_eq!(stats.approved_orders, 1);
    assert_eq!(stats.pending_revenue, Decimal::new(1000, 2));
    assert_eq!(stats.verified_revenue, Decimal::ZERO);
    assert_eq!(stats.top_products[0].product_name, "Trà");
    assert_eq!(stats.top_products[0].quantity, 5);
    assert_eq!(stats.top_products[1].quantity, 3);
}

#[tokio::test]
async fn test_bulk_delete_inclusive_range() {
    let (store, state) = memory_state();
    let at = |y, m, d, h, min, s| Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap();
    let before = seed_order(&store, at(2023, 12, 31, 23, 59, 59), OrderStatus::Pending, false, Decimal::ONE).await;
    let first = seed_order(&store, at(2024, 1, 1, 0, 0, 0), OrderStatus::Approved, true, Decimal::ONE).await;
    let last = seed_order(&store, at(2024, 1, 31, 23, 59, 59), OrderStatus::Rejected, false, Decimal::ONE).await;
    let after = seed_order(&store, at(2024, 2, 1, 0, 0, 0), OrderStatus::Pending, false, Decimal::ONE).await;

    let result = state
        .orders
        .bulk_delete(range((2024, 1, 1), (2024, 1, 31)))
        .await
        .unwrap();
    assert_eq!(result.deleted, 2);

    assert!(store.find_order(before.id).await.unwrap().is_some());
    assert!(store.find_order(first.id).await.unwrap().is_none());
    assert!(store.find_order(last.id).await.unwrap().is_none());
    assert!(store.find_order(after.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_bulk_delete_confirmation() {
    let (store, state) = memory_state();
    let now = Utc::now();
    seed_order(&store, now, OrderStatus::Pending, false, Decimal::ONE).await;
    seed_order(&store, now, OrderStatus::Approved, false, Decimal::ONE).await;

    let everything_as_range = BulkDeleteRequest {
        start_date: None,
        end_date: None,
        confirm: Some(BulkDeleteConfirm::Range),
    };
    let err = state.orders.bulk_delete(everything_as_range).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::ConfirmationRequired);

    let mut range_as_everything = range((2024, 1, 1), (2024, 1, 31));
    range_as_everything.confirm = Some(BulkDeleteConfirm::Everything);
    let err = state.orders.bulk_delete(range_as_everything).await.unwrap_err();
    assert_eq!(code(err), ErrorCode::ConfirmationRequired);

    let err = state
        .orders
        .bulk_delete(range((2024, 2, 1), (2024, 1, 1)))
        .await
        .unwrap_err();
    assert_eq!(code(err), ErrorCode::ValidationFailed);
    assert_eq!(store.count_orders(None).await.unwrap(), 2);

    let result = state
        .orders
        .bulk_delete(BulkDeleteRequest {
            start_date: None,
            end_date: None,
            confirm: Some(BulkDeleteConfirm::Everything),
        })
        .await
        .unwrap();
    assert_eq!(result.deleted, 2);
    assert_eq!(store.count_orders(None).await.unwrap(), 0);
}
