//! Cart state store.
//!
//! [`CartStore`] owns the in-memory line items and is the only mutation
//! surface. Every operation runs the same sequence under the store's async
//! lock: validate against the inventory service, mutate the line items,
//! persist the snapshot. Holding the lock across the whole sequence makes
//! concurrent invocations single-flight, so two rapid adds cannot read the
//! same pre-mutation state and lose an update.
//!
//! Operations return nothing: failures are reported through the
//! [`Notifier`] and leave the cart exactly as it was. The persisted
//! snapshot and the in-memory cart are not transactionally linked; a failed
//! persist is logged and healed by the next successful mutation.

use std::sync::Arc;

use guava_core::{LineItem, ProductId};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::config::CartConfig;
use crate::error::CartError;
use crate::inventory::{HttpInventoryClient, InventoryClient, InventoryError};
use crate::notify::{Notifier, TracingNotifier, messages};
use crate::storage::{CART_KEY, FileStore, PersistentStore};

/// Client-side shopping cart, scoped to the application's UI lifetime.
///
/// Cheaply cloneable; all clones share the same cart state and serialize
/// their mutations through one lock.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    inventory: Arc<dyn InventoryClient>,
    storage: Arc<dyn PersistentStore>,
    notifier: Arc<dyn Notifier>,
    cart: Mutex<Vec<LineItem>>,
}

impl CartStore {
    /// Open a cart store, restoring the persisted snapshot if present.
    ///
    /// An absent snapshot starts an empty cart. A corrupt snapshot is
    /// logged and discarded rather than propagated, so a bad write can
    /// never brick the cart.
    #[must_use]
    pub fn open(
        inventory: Arc<dyn InventoryClient>,
        storage: Arc<dyn PersistentStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let cart = load_snapshot(storage.as_ref());

        Self {
            inner: Arc::new(CartStoreInner {
                inventory,
                storage,
                notifier,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Open a cart store with the production collaborators: the HTTP
    /// inventory client, a file-backed store, and tracing notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory client cannot be built.
    pub fn from_config(config: &CartConfig) -> Result<Self, InventoryError> {
        let inventory = HttpInventoryClient::new(&config.inventory)?;
        let storage = FileStore::new(config.storage_path.clone());

        Ok(Self::open(
            Arc::new(inventory),
            Arc::new(storage),
            Arc::new(TracingNotifier),
        ))
    }

    /// Snapshot of the current line items, in insertion order.
    pub async fn cart(&self) -> Vec<LineItem> {
        self.inner.cart.lock().await.clone()
    }

    /// Total units across all line items (cart badge count).
    pub async fn item_count(&self) -> u32 {
        self.inner.cart.lock().await.iter().map(|l| l.amount).sum()
    }

    /// Add one unit of a product to the cart.
    ///
    /// Fetches the current stock level and product details, then either
    /// increments the existing line or appends a new one. Rejected with an
    /// "out of stock" notification when the incremented amount would exceed
    /// stock; any inventory failure becomes a generic "could not add"
    /// notification. The cart is unchanged on every failure path.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) {
        let mut cart = self.inner.cart.lock().await;

        match self.try_add(&mut cart, product_id).await {
            Ok(()) => {}
            Err(error @ CartError::StockExceeded { .. }) => {
                self.report_failure(&error, messages::OUT_OF_STOCK);
            }
            Err(error) => self.report_failure(&error, messages::ADD_FAILED),
        }
    }

    /// Remove a product from the cart entirely.
    ///
    /// Removing a product that is not in the cart notifies "could not
    /// remove" and changes nothing.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) {
        let mut cart = self.inner.cart.lock().await;

        match self.try_remove(&mut cart, product_id) {
            Ok(()) => {}
            Err(error) => self.report_failure(&error, messages::REMOVE_FAILED),
        }
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// An `amount` of zero is a silent no-op: no inventory query, no
    /// notification, no mutation. Removal is the dedicated path for taking
    /// an item out of the cart.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&self, product_id: ProductId, amount: u32) {
        if amount == 0 {
            return;
        }

        let mut cart = self.inner.cart.lock().await;

        match self.try_update(&mut cart, product_id, amount).await {
            Ok(()) => {}
            Err(error @ CartError::StockExceeded { .. }) => {
                self.report_failure(&error, messages::OUT_OF_STOCK);
            }
            Err(error) => self.report_failure(&error, messages::UPDATE_FAILED),
        }
    }

    // =========================================================================
    // Operation bodies
    // =========================================================================
    //
    // Each body validates fully before touching the line items, so an early
    // return leaves no partial mutation behind the lock.

    async fn try_add(
        &self,
        cart: &mut Vec<LineItem>,
        product_id: ProductId,
    ) -> Result<(), CartError> {
        let stock = self.inner.inventory.stock_level(product_id).await?;
        let product = self.inner.inventory.product(product_id).await?;

        let current = cart
            .iter()
            .find(|line| line.id() == product_id)
            .map_or(0, |line| line.amount);
        let desired = current + 1;

        if desired > stock.amount {
            return Err(CartError::StockExceeded {
                product_id,
                requested: desired,
                available: stock.amount,
            });
        }

        if let Some(line) = cart.iter_mut().find(|line| line.id() == product_id) {
            line.amount = desired;
        } else {
            cart.push(LineItem {
                product,
                amount: desired,
            });
        }

        self.persist(cart);
        Ok(())
    }

    fn try_remove(&self, cart: &mut Vec<LineItem>, product_id: ProductId) -> Result<(), CartError> {
        let index = cart
            .iter()
            .position(|line| line.id() == product_id)
            .ok_or(CartError::ItemNotFound(product_id))?;

        cart.remove(index);
        self.persist(cart);
        Ok(())
    }

    async fn try_update(
        &self,
        cart: &mut Vec<LineItem>,
        product_id: ProductId,
        amount: u32,
    ) -> Result<(), CartError> {
        let stock = self.inner.inventory.stock_level(product_id).await?;

        if amount > stock.amount {
            return Err(CartError::StockExceeded {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let line = cart
            .iter_mut()
            .find(|line| line.id() == product_id)
            .ok_or(CartError::ItemNotFound(product_id))?;

        line.amount = amount;
        self.persist(cart);
        Ok(())
    }

    /// Write the serialized cart to the persistent store.
    ///
    /// Failures are logged, not surfaced: the in-memory cart has already
    /// committed, and the snapshot re-syncs at the next successful mutation.
    fn persist(&self, cart: &[LineItem]) {
        match serde_json::to_string(cart) {
            Ok(json) => {
                if let Err(error) = self.inner.storage.set(CART_KEY, &json) {
                    warn!(error = %error, "failed to persist cart snapshot");
                }
            }
            Err(error) => warn!(error = %error, "failed to serialize cart snapshot"),
        }
    }

    fn report_failure(&self, error: &CartError, message: &str) {
        warn!(error = %error, "cart operation rejected");
        self.inner.notifier.error(message);
    }
}

/// Restore the persisted cart, falling back to empty on any failure.
fn load_snapshot(storage: &dyn PersistentStore) -> Vec<LineItem> {
    match storage.get(CART_KEY) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(cart) => {
                debug!("restored persisted cart");
                cart
            }
            Err(error) => {
                warn!(error = %error, "persisted cart is corrupt, starting empty");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(error) => {
            warn!(error = %error, "failed to read persisted cart, starting empty");
            Vec::new()
        }
    }
}
