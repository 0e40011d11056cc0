//! JSON and CSV exports.

use std::io;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use smartstock_inventory::{InventoryItem, ScannedBill};

/// Prefix of suggested export file names.
pub const FILENAME_PREFIX: &str = "smartstock_inventory_";

const CSV_HEADER: [&str; 8] = [
    "ID",
    "Name",
    "SKU",
    "Category",
    "Quantity",
    "Price",
    "Reorder Level",
    "Total Value",
];

/// Full export of the store's records.
///
/// Also the import format: feeding it back reconstructs the same inventory
/// and bill list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub inventory: Vec<InventoryItem>,
    pub scanned_bills: Vec<ScannedBill>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

/// `smartstock_inventory_YYYY-MM-DD.<ext>`.
pub fn export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{FILENAME_PREFIX}{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Header row plus one row per item, joined with `\n` (no trailing newline).
///
/// Fields containing a comma, quote or line break are quoted per RFC 4180.
pub fn inventory_csv(items: &[InventoryItem]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for item in items {
        writer.write_record([
            item.id_typed().to_string(),
            item.name().to_string(),
            item.sku().unwrap_or_default().to_string(),
            item.category().to_string(),
            item.quantity().to_string(),
            item.price().to_string(),
            item.reorder_level().to_string(),
            format!("{:.2}", item.total_value()),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let mut out = String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    // every record ends with the terminator; keep it as a separator only
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartstock_core::{Category, ItemId};
    use smartstock_inventory::NewItem;

    #[test]
    fn csv_has_header_and_computed_total() {
        let items = vec![InventoryItem::create(
            ItemId::new(1),
            NewItem::new("Widget", Category::Electronics, 3, 2.5).with_sku("W-1"),
            10,
        )];
        let csv = inventory_csv(&items).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "ID,Name,SKU,Category,Quantity,Price,Reorder Level,Total Value"
        );
        assert_eq!(lines[1], "1,Widget,W-1,Electronics,3,2.5,10,7.50");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn csv_quotes_fields_with_commas_and_quotes() {
        let items = vec![InventoryItem::create(
            ItemId::new(7),
            NewItem::new("Cable, \"braided\"", Category::Electronics, 1, 1.0),
            10,
        )];
        let csv = inventory_csv(&items).unwrap();
        assert_eq!(
            csv.lines().nth(1).unwrap(),
            "7,\"Cable, \"\"braided\"\"\",,Electronics,1,1,10,1.00"
        );
    }

    #[test]
    fn csv_quotes_line_breaks_and_leaves_plain_fields_bare() {
        let items = vec![InventoryItem::create(
            ItemId::new(2),
            NewItem::new("Two\nLines", Category::Books, 4, 0.5).with_sku("B-2"),
            10,
        )];
        let csv = inventory_csv(&items).unwrap();
        assert!(csv.ends_with("2,\"Two\nLines\",B-2,Books,4,0.5,10,2.00"));
    }

    #[test]
    fn filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            export_filename(ExportFormat::Csv, date),
            "smartstock_inventory_2024-03-09.csv"
        );
        assert_eq!(
            export_filename(ExportFormat::Json, date),
            "smartstock_inventory_2024-03-09.json"
        );
    }
}
