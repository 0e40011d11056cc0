//! Durable string key/value storage backends.

use std::sync::Arc;

use crate::error::StorageError;

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryStorage;
pub use sqlite::SqliteStorage;

/// Keys of the four independently stored blobs.
pub mod keys {
    /// JSON array of inventory items.
    pub const INVENTORY: &str = "smartstock_inventory";
    /// JSON array of scanned bills.
    pub const SCANNED_BILLS: &str = "smartstock_scanned_bills";
    /// JSON object of settings.
    pub const SETTINGS: &str = "smartstock_settings";
    /// Stringified next item id.
    pub const NEXT_ID: &str = "smartstock_next_id";

    pub const ALL: [&str; 4] = [INVENTORY, SCANNED_BILLS, SETTINGS, NEXT_ID];
}

/// Synchronous string key/value store.
///
/// Every call completes (or fails) before returning; the store relies on this
/// to guarantee that a mutation is durable once the mutator returns.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Write several keys as one unit.
    ///
    /// The default writes them one after another; backends with transactions
    /// override it so a full-state overwrite is all-or-nothing.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<S> KeyValueStorage for Arc<S>
where
    S: KeyValueStorage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        (**self).set_many(entries)
    }
}

impl<S> KeyValueStorage for Box<S>
where
    S: KeyValueStorage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        (**self).set_many(entries)
    }
}
