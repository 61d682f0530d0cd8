//! Cart operation errors.
//!
//! Every `CartError` is caught at the operation boundary inside
//! [`crate::store::CartStore`]: the variant picks the user-facing
//! notification and the error never escapes to the caller.

use guava_core::ProductId;
use thiserror::Error;

use crate::inventory::InventoryError;

/// Errors raised while applying a cart operation.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity exceeds the available stock.
    #[error(
        "requested quantity {requested} exceeds stock {available} for product {product_id}"
    )]
    StockExceeded {
        /// Product being added or updated.
        product_id: ProductId,
        /// Quantity the operation asked for.
        requested: u32,
        /// Stock reported by the inventory service.
        available: u32,
    },

    /// The operation referenced a product that is not in the cart.
    #[error("product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// The inventory service call failed.
    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),
}
