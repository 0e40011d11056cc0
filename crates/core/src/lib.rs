//! `smartstock-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no I/O): identifiers, the
//! closed category set, seasons and the seasonal multiplier table, and static
//! configuration.

pub mod category;
pub mod config;
pub mod entity;
pub mod error;
pub mod id;
pub mod season;

pub use category::Category;
pub use config::{InventoryConfig, UploadLimits};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BillId, ItemId, MAX_ID};
pub use season::{
    DEFAULT_MULTIPLIER, Season, SeasonMultipliers, SeasonSource, SeasonalCalendar, SeasonalTable,
};
