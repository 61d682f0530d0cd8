//! Product and cart domain types.
//!
//! These types model the inventory service's product catalogue and the
//! cart's line items. The cart is persisted as a JSON array of
//! [`LineItem`], with product attributes flattened into each entry, so the
//! stored shape is `{ id, title, price, image, amount }`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// Product details as reported by the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Decimal,
    /// Product image URL.
    pub image: String,
}

/// Available stock for a product.
///
/// Transient: fetched per-operation from the inventory service, never
/// cached or persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Units available for sale.
    pub amount: u32,
}

/// Errors that can occur when building a [`LineItem`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineItemError {
    /// The requested amount was zero.
    #[error("line item amount must be positive")]
    ZeroAmount,
}

/// One product entry in the cart with its requested quantity.
///
/// Invariant: `amount > 0`. Items whose quantity would drop to zero are
/// removed from the cart, never kept at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product this line refers to.
    #[serde(flatten)]
    pub product: Product,
    /// Requested quantity.
    pub amount: u32,
}

impl LineItem {
    /// Create a line item, rejecting a zero amount.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::ZeroAmount`] if `amount` is zero.
    pub fn new(product: Product, amount: u32) -> Result<Self, LineItemError> {
        if amount == 0 {
            return Err(LineItemError::ZeroAmount);
        }
        Ok(Self { product, amount })
    }

    /// The ID of the product on this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Total price for this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.amount)
    }
}
