//! Inventory data model.
//!
//! This crate contains the records the store owns (items, scanned bills,
//! settings), the stock-level rules shared with the presentation layer, and the
//! validation boundary that turns collaborator input into typed values. It
//! performs no I/O.

pub mod bill;
pub mod item;
pub mod settings;
pub mod summary;
pub mod validation;

pub use bill::{BillLine, NewBill, ScannedBill};
pub use item::{InventoryItem, ItemPatch, NewItem, StockLevel};
pub use settings::{Settings, SettingsPatch};
pub use summary::{CategoryBreakdown, CategorySummary};
pub use validation::{
    BillInput, BillLineInput, ItemInput, ItemPatchInput, UploadBatch, UploadFile, UploadRejection,
    validate_bill, validate_item, validate_patch, validate_upload,
};
