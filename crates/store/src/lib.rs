//! Inventory store with write-through key/value persistence.
//!
//! [`Store`] is the single authority over items, scanned bills and settings.
//! Persistence goes through the [`KeyValueStorage`] seam; SQLite and in-memory
//! backends are provided.

pub mod error;
pub mod export;
pub mod seed;
pub mod storage;
pub mod store;

pub use error::StorageError;
pub use export::{ExportFormat, ExportSnapshot, export_filename, inventory_csv};
pub use storage::{InMemoryStorage, KeyValueStorage, SqliteStorage, keys};
pub use store::{InventoryStats, MergeReport, Store};
