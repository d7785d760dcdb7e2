#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderItem, OrderStatus, Product, Theme, ThemeForm};
use storefront_server::{Config, DataStore, MemoryStore, ServerState, ServiceError};
use uuid::Uuid;

/// Fresh state over an empty in-memory store
pub fn memory_state() -> (Arc<MemoryStore>, ServerState) {
    let store = Arc::new(MemoryStore::new());
    let state = ServerState::with_store(Config::default(), store.clone());
    (store, state)
}

pub fn code(err: ServiceError) -> ErrorCode {
    AppError::from(err).code
}

pub fn theme(slug: &str, vars: &[(&str, &str)]) -> Theme {
    let form = ThemeForm {
        name: slug.to_uppercase(),
        slug: slug.to_string(),
        css_variables: vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        ..ThemeForm::default()
    };
    Theme::from_form(Uuid::new_v4(), form, Utc::now())
}

pub async fn seed_theme(store: &MemoryStore, slug: &str, vars: &[(&str, &str)]) -> Theme {
    let theme = theme(slug, vars);
    store.insert_theme(&theme).await.unwrap();
    theme
}

pub fn product(name: &str, price: Decimal, stock: i32) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price,
        stock_quantity: stock,
        image_url: None,
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn seed_product(store: &MemoryStore, name: &str, price: Decimal, stock: i32) -> Product {
    let product = product(name, price, stock);
    store.put_product(product.clone());
    product
}

/// An order row inserted directly, bypassing checkout
pub async fn seed_order(
    store: &MemoryStore,
    created_at: DateTime<Utc>,
    status: OrderStatus,
    verified: bool,
    total: Decimal,
) -> Order {
    let id = Uuid::new_v4();
    let order = Order {
        id,
        status,
        verified_at: verified.then_some(created_at),
        notes: None,
        customer_name: "Lan".to_string(),
        customer_phone: "0900000000".to_string(),
        customer_email: None,
        customer_address: None,
        delivery_time: None,
        customer_message: None,
        total_amount: total,
        created_at,
        updated_at: created_at,
        items: vec![OrderItem {
            id: Uuid::new_v4(),
            order_id: id,
            product_id: Uuid::new_v4(),
            product_name: "Seeded".to_string(),
            quantity: 1,
            selected_color: None,
            selected_size: None,
            unit_price: total,
        }],
    };
    store.insert_order(&order).await.unwrap();
    order
}
