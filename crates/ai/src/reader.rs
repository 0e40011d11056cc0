use smartstock_inventory::InventoryItem;
use smartstock_store::{KeyValueStorage, Store};

/// Read-only view of the inventory the forecaster works from.
///
/// Implementations must return items in storage order; insights and
/// recommendations inherit that order.
pub trait InventoryReader {
    fn inventory(&self) -> &[InventoryItem];

    fn low_stock_items(&self) -> Vec<&InventoryItem> {
        self.inventory().iter().filter(|i| i.is_low_stock()).collect()
    }
}

impl<S: KeyValueStorage> InventoryReader for Store<S> {
    fn inventory(&self) -> &[InventoryItem] {
        self.items()
    }
}

impl<R: InventoryReader + ?Sized> InventoryReader for &R {
    fn inventory(&self) -> &[InventoryItem] {
        (**self).inventory()
    }
}

impl InventoryReader for Vec<InventoryItem> {
    fn inventory(&self) -> &[InventoryItem] {
        self
    }
}

impl InventoryReader for [InventoryItem] {
    fn inventory(&self) -> &[InventoryItem] {
        self
    }
}
