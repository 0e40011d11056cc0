//! Scanned bills: unmerged batches of provisional line items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartstock_core::{BillId, Category, Entity};

use crate::item::NewItem;

/// One provisional line detected on a bill.
///
/// Not an inventory item until the bill is merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLine {
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    pub price: f64,
}

impl BillLine {
    pub fn new(name: impl Into<String>, category: Category, quantity: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            category,
            quantity,
            price,
        }
    }

    /// The item this line becomes when merged and no matching item exists.
    pub fn to_new_item(&self) -> NewItem {
        NewItem::new(self.name.clone(), self.category, self.quantity, self.price)
    }
}

/// Validated input for recording a scan result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub filename: String,
    pub filesize: u64,
    pub items: Vec<BillLine>,
}

/// A recorded scan result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedBill {
    id: BillId,
    filename: String,
    filesize: u64,
    items: Vec<BillLine>,
    date: DateTime<Utc>,
}

impl ScannedBill {
    pub fn create(id: BillId, new: NewBill, date: DateTime<Utc>) -> Self {
        Self {
            id,
            filename: new.filename,
            filesize: new.filesize,
            items: new.items,
            date,
        }
    }

    pub fn id_typed(&self) -> BillId {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn filesize(&self) -> u64 {
        self.filesize
    }

    pub fn items(&self) -> &[BillLine] {
        &self.items
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Σ quantity × price over the bill's lines.
    pub fn total_value(&self) -> f64 {
        self.items
            .iter()
            .map(|l| f64::from(l.quantity) * l.price)
            .sum()
    }
}

impl Entity for ScannedBill {
    type Id = BillId;

    fn id(&self) -> BillId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_keeps_line_order_and_metadata() {
        let date = Utc::now();
        let bill = ScannedBill::create(
            BillId::new(1_700_000_000_000),
            NewBill {
                filename: "receipt.png".to_string(),
                filesize: 2048,
                items: vec![
                    BillLine::new("USB Cable", Category::Electronics, 10, 12.99),
                    BillLine::new("Board Game", Category::Toys, 6, 34.99),
                ],
            },
            date,
        );

        assert_eq!(bill.filename(), "receipt.png");
        assert_eq!(bill.filesize(), 2048);
        assert_eq!(bill.date(), date);
        assert_eq!(bill.items()[0].name, "USB Cable");
        assert_eq!(bill.items()[1].category, Category::Toys);
    }

    #[test]
    fn line_converts_to_new_item_without_reorder_level() {
        let line = BillLine::new("T-Shirt", Category::Clothing, 8, 24.99);
        let item = line.to_new_item();
        assert_eq!(item.name, "T-Shirt");
        assert_eq!(item.quantity, 8);
        assert_eq!(item.reorder_level, None);
        assert_eq!(item.sku, None);
    }
}
