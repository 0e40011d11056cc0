//! Sample dataset loaded on first run and after a reset.

use smartstock_core::Category;
use smartstock_inventory::NewItem;

/// The eight canonical sample items, in id order (ids 1..=8 after seeding).
pub fn sample_items() -> Vec<NewItem> {
    vec![
        NewItem::new("Wireless Headphones", Category::Electronics, 45, 79.99)
            .with_sku("ELEC-WH-001")
            .with_reorder_level(15),
        NewItem::new("Winter Jacket", Category::Clothing, 12, 129.99)
            .with_sku("CLTH-WJ-002")
            .with_reorder_level(10),
        NewItem::new("Coffee Beans", Category::Food, 8, 15.99)
            .with_sku("FOOD-CB-003")
            .with_reorder_level(10),
        NewItem::new("Yoga Mat", Category::Sports, 25, 29.99)
            .with_sku("SPRT-YM-004")
            .with_reorder_level(12),
        NewItem::new("Smart Watch", Category::Electronics, 18, 199.99)
            .with_sku("ELEC-SW-005")
            .with_reorder_level(8),
        NewItem::new("Garden Tools Set", Category::Home, 15, 49.99)
            .with_sku("HOME-GT-006")
            .with_reorder_level(10),
        NewItem::new("Moisturizer Cream", Category::Beauty, 32, 24.99)
            .with_sku("BEAU-MC-007")
            .with_reorder_level(15),
        NewItem::new("Best Seller Novel", Category::Books, 22, 16.99)
            .with_sku("BOOK-BSN-008")
            .with_reorder_level(10),
    ]
}
