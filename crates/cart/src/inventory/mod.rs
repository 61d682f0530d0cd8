//! Inventory service boundary.
//!
//! The inventory service is the source of truth for product details and
//! current stock levels. The cart queries it per-operation and never caches
//! either: stock drifts, and product details are cheap to re-fetch.

mod http;

pub use http::HttpInventoryClient;

use async_trait::async_trait;
use guava_core::{Product, ProductId, StockLevel};
use thiserror::Error;

/// Errors that can occur when interacting with the inventory service.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Product not found.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the inventory service.
///
/// Both calls fail with a tagged [`InventoryError`] on network or
/// not-found conditions; the cart maps any of them to a user-facing
/// notification at its operation boundary.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Current stock level for a product.
    async fn stock_level(&self, product_id: ProductId) -> Result<StockLevel, InventoryError>;

    /// Product details for a product.
    async fn product(&self, product_id: ProductId) -> Result<Product, InventoryError>;
}
