//! Guava Market cart library.
//!
//! Client-side shopping-cart state management for the Guava Market
//! storefront: adding items, removing items, and adjusting quantities, with
//! stock-limit validation against the inventory service and persistence to
//! local durable storage.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the in-memory line items and serializes all
//!   mutations through a per-store async lock
//! - [`inventory::InventoryClient`] is the inventory service boundary
//!   (stock levels and product details)
//! - [`storage::PersistentStore`] is the durable key-value snapshot store
//! - [`notify::Notifier`] is the user-visible notification side channel
//!
//! Operations never surface errors to the caller: failures are reported
//! through the notifier and leave the cart unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use guava_cart::{config::CartConfig, store::CartStore};
//! use guava_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::from_config(&config)?;
//!
//! store.add_product(ProductId::new(42)).await;
//! for line in store.cart().await {
//!     println!("{} x{}", line.product.title, line.amount);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod inventory;
pub mod notify;
pub mod storage;
pub mod store;

pub use error::CartError;
pub use store::CartStore;
