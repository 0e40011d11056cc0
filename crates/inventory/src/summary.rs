//! Aggregates over the current inventory.

use serde::{Deserialize, Serialize};

use smartstock_core::Category;

use crate::item::InventoryItem;

/// Totals of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: Category,
    /// Σ quantity.
    pub quantity: u64,
    /// Σ quantity × price.
    pub value: f64,
    /// Member items in storage order.
    pub items: Vec<InventoryItem>,
}

/// Per-category totals, in order of each category's first appearance in storage.
///
/// Categories without items are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryBreakdown(Vec<CategorySummary>);

impl CategoryBreakdown {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a InventoryItem>) -> Self {
        let mut summaries: Vec<CategorySummary> = Vec::new();
        for item in items {
            let idx = match summaries.iter().position(|s| s.category == item.category()) {
                Some(idx) => idx,
                None => {
                    summaries.push(CategorySummary {
                        category: item.category(),
                        quantity: 0,
                        value: 0.0,
                        items: Vec::new(),
                    });
                    summaries.len() - 1
                }
            };
            let summary = &mut summaries[idx];
            summary.quantity += u64::from(item.quantity());
            summary.value += item.total_value();
            summary.items.push(item.clone());
        }
        Self(summaries)
    }

    pub fn get(&self, category: Category) -> Option<&CategorySummary> {
        self.0.iter().find(|s| s.category == category)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().map(|s| s.category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategorySummary> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for CategoryBreakdown {
    type Item = CategorySummary;
    type IntoIter = std::vec::IntoIter<CategorySummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
