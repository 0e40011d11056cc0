use serde::{Deserialize, Serialize};

use smartstock_core::{Category, Entity, ItemId};

/// A stocked product line.
///
/// Fields are private: the id is immutable once assigned and the quantity can
/// only move through [`InventoryItem::adjust_quantity`], which clamps at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sku: Option<String>,
    category: Category,
    quantity: u32,
    price: f64,
    reorder_level: u32,
}

impl InventoryItem {
    /// Materialize a validated [`NewItem`] under `id`.
    ///
    /// `default_reorder_level` is used only when the new item carries none.
    pub fn create(id: ItemId, new: NewItem, default_reorder_level: u32) -> Self {
        Self {
            id,
            name: new.name,
            sku: new.sku,
            category: new.category,
            quantity: new.quantity,
            price: new.price,
            reorder_level: new.reorder_level.unwrap_or(default_reorder_level),
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn reorder_level(&self) -> u32 {
        self.reorder_level
    }

    /// quantity × price.
    pub fn total_value(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }

    /// Strictly below the item's own reorder level.
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.reorder_level
    }

    pub fn stock_level(&self, medium_threshold: u32) -> StockLevel {
        StockLevel::classify(self.quantity, self.reorder_level, medium_threshold)
    }

    /// Apply a signed quantity change, clamping the result to `0..=u32::MAX`.
    pub fn adjust_quantity(&mut self, delta: i64) -> u32 {
        let next = i64::from(self.quantity).saturating_add(delta);
        self.quantity = next.clamp(0, i64::from(u32::MAX)) as u32;
        self.quantity
    }

    /// Shallow-merge the fields present in `patch`.
    pub fn apply_patch(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(sku) = patch.sku {
            self.sku = sku;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(reorder_level) = patch.reorder_level {
            self.reorder_level = reorder_level;
        }
    }

    /// Case-insensitive substring match over name, category and sku.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.category.as_str().to_lowercase().contains(needle)
            || self
                .sku
                .as_deref()
                .is_some_and(|sku| sku.to_lowercase().contains(needle))
    }

    /// Same product as a scanned line: case-insensitive name, exact category.
    pub fn is_same_product(&self, name: &str, category: Category) -> bool {
        self.category == category && self.name.to_lowercase() == name.to_lowercase()
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

/// Validated input for creating an item (no id yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub category: Category,
    pub quantity: u32,
    pub price: f64,
    #[serde(default)]
    pub reorder_level: Option<u32>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, category: Category, quantity: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            sku: None,
            category,
            quantity,
            price,
            reorder_level: None,
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_reorder_level(mut self, reorder_level: u32) -> Self {
        self.reorder_level = Some(reorder_level);
        self
    }
}

/// Partial update of an item. `None` leaves a field untouched.
///
/// `sku: Some(None)` clears the sku.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub name: Option<String>,
    pub sku: Option<Option<String>>,
    pub category: Option<Category>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
    pub reorder_level: Option<u32>,
}

impl ItemPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn sku(mut self, sku: Option<String>) -> Self {
        self.sku = Some(sku);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn reorder_level(mut self, reorder_level: u32) -> Self {
        self.reorder_level = Some(reorder_level);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Stock classification relative to the item's reorder level.
///
/// The low/medium boundary is per item; the medium/high boundary is a single
/// global threshold. An item with a high reorder level can therefore be "low"
/// at a quantity that would be "medium" for another item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Low,
    Medium,
    High,
}

impl StockLevel {
    pub fn classify(quantity: u32, reorder_level: u32, medium_threshold: u32) -> Self {
        if quantity < reorder_level {
            StockLevel::Low
        } else if quantity < medium_threshold {
            StockLevel::Medium
        } else {
            StockLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::Low => "low",
            StockLevel::Medium => "medium",
            StockLevel::High => "high",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::Low => "Low Stock",
            StockLevel::Medium => "Medium Stock",
            StockLevel::High => "In Stock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use smartstock_core::config::{DEFAULT_REORDER_LEVEL, MEDIUM_STOCK_THRESHOLD};

    fn widget() -> InventoryItem {
        InventoryItem::create(
            ItemId::new(1),
            NewItem::new("Widget", Category::Electronics, 5, 2.5).with_sku("EL-W-1"),
            DEFAULT_REORDER_LEVEL,
        )
    }

    #[test]
    fn create_applies_default_reorder_level_only_when_absent() {
        let item = widget();
        assert_eq!(item.reorder_level(), DEFAULT_REORDER_LEVEL);

        let explicit_zero = InventoryItem::create(
            ItemId::new(2),
            NewItem::new("Cable", Category::Electronics, 1, 1.0).with_reorder_level(0),
            DEFAULT_REORDER_LEVEL,
        );
        assert_eq!(explicit_zero.reorder_level(), 0);
        assert!(!explicit_zero.is_low_stock());
    }

    #[test]
    fn total_value_is_quantity_times_price() {
        assert_eq!(widget().total_value(), 12.5);
    }

    #[test]
    fn adjust_quantity_clamps_at_zero() {
        let mut item = widget();
        assert_eq!(item.adjust_quantity(-3), 2);
        assert_eq!(item.adjust_quantity(-100), 0);
        assert_eq!(item.adjust_quantity(7), 7);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut item = widget();
        item.apply_patch(ItemPatch::default().name("Gadget").price(3.0));
        assert_eq!(item.name(), "Gadget");
        assert_eq!(item.price(), 3.0);
        assert_eq!(item.quantity(), 5);
        assert_eq!(item.sku(), Some("EL-W-1"));

        item.apply_patch(ItemPatch::default().sku(None));
        assert_eq!(item.sku(), None);
        assert_eq!(item.id_typed(), ItemId::new(1));
    }

    #[test]
    fn search_matches_name_category_and_sku() {
        let item = widget();
        assert!(item.matches_lowercase("widg"));
        assert!(item.matches_lowercase("electro"));
        assert!(item.matches_lowercase("el-w"));
        assert!(!item.matches_lowercase("toys"));
    }

    #[test]
    fn same_product_ignores_name_case_but_not_category() {
        let item = widget();
        assert!(item.is_same_product("WIDGET", Category::Electronics));
        assert!(!item.is_same_product("widget", Category::Toys));
    }

    #[test]
    fn stock_level_boundaries() {
        assert_eq!(StockLevel::classify(9, 10, 30), StockLevel::Low);
        assert_eq!(StockLevel::classify(10, 10, 30), StockLevel::Medium);
        assert_eq!(StockLevel::classify(29, 10, 30), StockLevel::Medium);
        assert_eq!(StockLevel::classify(30, 10, 30), StockLevel::High);
        // reorder level above the global threshold: still "low" below it
        assert_eq!(StockLevel::classify(35, 40, 30), StockLevel::Low);
        assert_eq!(widget().stock_level(MEDIUM_STOCK_THRESHOLD).label(), "Low Stock");
    }

    #[test]
    fn persisted_shape_uses_camel_case_and_omits_missing_sku() {
        let item = InventoryItem::create(
            ItemId::new(3),
            NewItem::new("Mat", Category::Sports, 4, 9.5),
            12,
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["reorderLevel"], 12);
        assert_eq!(json["category"], "Sports");
        assert!(json.get("sku").is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: quantity after an adjustment is max(0, previous + delta).
        #[test]
        fn adjust_quantity_is_clamped_sum(start in 0u32..10_000, delta in -20_000i64..20_000) {
            let mut item = InventoryItem::create(
                ItemId::new(1),
                NewItem::new("P", Category::Food, start, 1.0),
                10,
            );
            let expected = (i64::from(start) + delta).max(0) as u32;
            prop_assert_eq!(item.adjust_quantity(delta), expected);
            prop_assert_eq!(item.quantity(), expected);
        }
    }
}
