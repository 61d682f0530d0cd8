//! User-visible notifications.
//!
//! Cart operations report failures only through this side channel; the UI
//! layer renders the messages as toasts. Messages are fixed per failure
//! path so the UI stays consistent with what the storefront copy expects.

/// Fixed notification messages emitted by cart operations.
pub mod messages {
    /// The requested quantity exceeds the available stock.
    pub const OUT_OF_STOCK: &str = "Requested quantity is out of stock";
    /// Adding a product failed for any other reason.
    pub const ADD_FAILED: &str = "Could not add product to cart";
    /// Removing a product failed.
    pub const REMOVE_FAILED: &str = "Could not remove product from cart";
    /// Updating a product quantity failed.
    pub const UPDATE_FAILED: &str = "Could not update product quantity";
}

/// Notification side channel toward the UI layer.
pub trait Notifier: Send + Sync {
    /// Report a user-visible error message.
    fn error(&self, message: &str);
}

/// Notifier that emits messages through `tracing`.
///
/// The default wiring when no UI toast channel is attached: messages land
/// in the log stream at WARN.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(target: "guava_cart::notify", "{message}");
    }
}
