//! Integration tests for Guava Market.
//!
//! Scenario tests drive [`guava_cart::CartStore`] end-to-end through the
//! full validate/mutate/persist flow against the fixtures in this crate:
//! a fake inventory service with adjustable stock, a recording notifier,
//! and real file-backed storage where the scenario calls for it.
//!
//! # Test Categories
//!
//! - `cart_operations` - Operation semantics against in-memory collaborators
//! - `persistence` - Snapshot durability across store restarts

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use guava_cart::inventory::{InventoryClient, InventoryError};
use guava_cart::notify::Notifier;
use guava_core::{Product, ProductId, StockLevel};
use rust_decimal::Decimal;

/// Initialize tracing for test output.
///
/// Safe to call from every test; only the first call installs the
/// subscriber.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a catalogue product for tests.
#[must_use]
pub fn test_product(id: i32) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Decimal::new(12990, 2),
        image: format!("https://cdn.guavamarket.dev/img/{id}.jpg"),
    }
}

/// Fake inventory service with independently adjustable catalogue and
/// stock tables.
///
/// A product can exist in one table but not the other, which lets tests
/// exercise each inventory call failing on its own.
#[derive(Default)]
pub struct FakeInventory {
    products: Mutex<HashMap<i32, Product>>,
    stock: Mutex<HashMap<i32, u32>>,
    stock_calls: AtomicUsize,
}

impl FakeInventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with its stock level.
    pub fn insert(&self, product: Product, stock: u32) {
        let id = product.id.as_i32();
        lock(&self.products).insert(id, product);
        lock(&self.stock).insert(id, stock);
    }

    /// Adjust the stock level for a product (simulates drift after a
    /// validation has already passed).
    pub fn set_stock(&self, product_id: ProductId, amount: u32) {
        lock(&self.stock).insert(product_id.as_i32(), amount);
    }

    /// Remove a product from the catalogue table only, leaving its stock
    /// entry in place.
    pub fn remove_product_details(&self, product_id: ProductId) {
        lock(&self.products).remove(&product_id.as_i32());
    }

    /// Number of stock lookups served so far.
    #[must_use]
    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventoryClient for FakeInventory {
    async fn stock_level(&self, product_id: ProductId) -> Result<StockLevel, InventoryError> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.stock)
            .get(&product_id.as_i32())
            .map(|&amount| StockLevel { amount })
            .ok_or(InventoryError::NotFound(product_id))
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        lock(&self.products)
            .get(&product_id.as_i32())
            .cloned()
            .ok_or(InventoryError::NotFound(product_id))
    }
}

/// Notifier that records every message for later assertion.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Create an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        lock(&self.messages).push(message.to_string());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
