//! Durable key-value storage for cart snapshots.
//!
//! The cart is serialized under the single fixed key [`CART_KEY`] after
//! every successful mutation and read back once when the store is opened.
//! Storage stands in for the browser's `localStorage`: string values under
//! string keys, surviving restarts.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// The fixed key the serialized cart is stored under.
pub const CART_KEY: &str = "cart";

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be decoded.
    #[error("corrupt store: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Key-value string storage surviving process restarts.
///
/// The cart treats writes as fire-and-forget: a failed `set` is logged by
/// the caller and healed by the next successful mutation, never surfaced
/// as an operation failure.
pub trait PersistentStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or decoded.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
