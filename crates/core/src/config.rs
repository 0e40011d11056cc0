//! Static business configuration.

use serde::{Deserialize, Serialize};

/// Reorder level applied to items created without one.
pub const DEFAULT_REORDER_LEVEL: u32 = 10;

/// Quantity at which a non-low item stops being "medium" stock.
pub const MEDIUM_STOCK_THRESHOLD: u32 = 30;

/// Quantity under which a low-stock item is urgent.
pub const CRITICAL_STOCK_QUANTITY: u32 = 5;

/// Version string stamped into exports.
pub const APP_VERSION: &str = "1.0.0";

/// Tunables for inventory rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryConfig {
    pub default_reorder_level: u32,
    pub medium_stock_threshold: u32,
    pub critical_stock_quantity: u32,
    pub version: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            default_reorder_level: DEFAULT_REORDER_LEVEL,
            medium_stock_threshold: MEDIUM_STOCK_THRESHOLD,
            critical_stock_quantity: CRITICAL_STOCK_QUANTITY,
            version: APP_VERSION.to_string(),
        }
    }
}

impl InventoryConfig {
    pub fn with_default_reorder_level(mut self, level: u32) -> Self {
        self.default_reorder_level = level;
        self
    }
}

/// Limits enforced on a batch of uploaded bill files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadLimits {
    /// Per-file size limit in bytes.
    pub max_file_size: u64,
    pub max_files: usize,
    pub accepted_types: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            max_files: 5,
            accepted_types: ["image/jpeg", "image/png", "image/jpg", "application/pdf"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl UploadLimits {
    pub fn accepts_type(&self, mime: &str) -> bool {
        self.accepted_types.iter().any(|t| t.eq_ignore_ascii_case(mime.trim()))
    }
}
