//! The inventory store: authoritative records plus write-through persistence.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use smartstock_core::entity::position_of;
use smartstock_core::{
    BillId, Category, DomainError, DomainResult, InventoryConfig, ItemId, MAX_ID,
    SeasonalCalendar,
};
use smartstock_inventory::{
    CategoryBreakdown, InventoryItem, ItemPatch, NewBill, NewItem, ScannedBill, Settings,
    SettingsPatch,
};

use crate::error::StorageError;
use crate::export::{self, ExportSnapshot};
use crate::seed;
use crate::storage::{KeyValueStorage, keys};

/// Dashboard counters, read in one go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_items: usize,
    pub total_value: f64,
    pub low_stock_count: usize,
    pub predicted_growth: f64,
}

/// Outcome of merging a scanned bill into the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    pub bill_id: BillId,
    /// Lines that topped up an existing item.
    pub updated: usize,
    /// Lines that created a new item.
    pub created: usize,
    /// The touched items after the merge, one per line, in line order.
    pub items: Vec<InventoryItem>,
}

impl MergeReport {
    pub fn lines_merged(&self) -> usize {
        self.updated + self.created
    }
}

/// Decoded contents of the four storage keys.
struct PersistedState {
    items: Vec<InventoryItem>,
    bills: Vec<ScannedBill>,
    settings: Settings,
    next_id: Option<u64>,
}

/// Owns items, scanned bills, settings and the item id counter.
///
/// Every mutator writes the whole state to `storage` before returning. Write
/// failures are logged and the store keeps operating on its in-memory state.
/// Lookups by id that miss return `None`.
#[derive(Debug)]
pub struct Store<S> {
    storage: S,
    config: InventoryConfig,
    calendar: SeasonalCalendar,
    items: Vec<InventoryItem>,
    bills: Vec<ScannedBill>,
    settings: Settings,
    next_id: u64,
}

impl<S: KeyValueStorage> Store<S> {
    /// Load the store from `storage` with default configuration.
    pub fn open(storage: S) -> Self {
        Self::with_config(storage, InventoryConfig::default(), SeasonalCalendar::default())
    }

    /// Load the store from `storage`.
    ///
    /// Falls back to the sample dataset when nothing is stored yet or when any
    /// stored blob cannot be read or decoded.
    pub fn with_config(storage: S, config: InventoryConfig, calendar: SeasonalCalendar) -> Self {
        let mut store = Self {
            storage,
            config,
            calendar,
            items: Vec::new(),
            bills: Vec::new(),
            settings: Settings::default(),
            next_id: 1,
        };
        store.load();
        store
    }

    fn load(&mut self) {
        match self.read_state() {
            Ok(Some(state)) => {
                let floor = self.items_floor(&state.items);
                self.next_id = state.next_id.map_or(floor, |stored| stored.max(floor));
                self.items = state.items;
                self.bills = state.bills;
                self.settings = state.settings;
                tracing::info!(
                    items = self.items.len(),
                    bills = self.bills.len(),
                    next_id = self.next_id,
                    "inventory loaded from storage"
                );
            }
            Ok(None) => {
                tracing::info!("no stored inventory; seeding sample data");
                self.clear_state();
                self.seed_sample_data();
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load stored inventory; reseeding sample data");
                self.clear_state();
                self.seed_sample_data();
            }
        }
    }

    fn read_state(&self) -> Result<Option<PersistedState>, StorageError> {
        let Some(inventory) = self.storage.get(keys::INVENTORY)? else {
            return Ok(None);
        };
        let items: Vec<InventoryItem> = serde_json::from_str(&inventory)
            .map_err(|e| StorageError::codec(keys::INVENTORY, e))?;
        check_ids(items.iter().map(|i| i.id_typed().get()), "item")
            .map_err(|reason| StorageError::corrupt(keys::INVENTORY, reason))?;

        let bills: Vec<ScannedBill> = match self.storage.get(keys::SCANNED_BILLS)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::codec(keys::SCANNED_BILLS, e))?,
            None => Vec::new(),
        };
        check_ids(bills.iter().map(|b| b.id_typed().get()), "bill")
            .map_err(|reason| StorageError::corrupt(keys::SCANNED_BILLS, reason))?;

        let mut settings = Settings::default();
        if let Some(raw) = self.storage.get(keys::SETTINGS)? {
            let patch: SettingsPatch = serde_json::from_str(&raw)
                .map_err(|e| StorageError::codec(keys::SETTINGS, e))?;
            settings.merge(patch);
        }

        let next_id = match self.storage.get(keys::NEXT_ID)? {
            Some(raw) => {
                let next = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| StorageError::corrupt(keys::NEXT_ID, e.to_string()))?;
                if next > MAX_ID + 1 {
                    return Err(StorageError::corrupt(
                        keys::NEXT_ID,
                        format!("{next} exceeds the id range"),
                    ));
                }
                Some(next)
            }
            None => None,
        };

        Ok(Some(PersistedState {
            items,
            bills,
            settings,
            next_id,
        }))
    }

    /// Smallest id that is guaranteed unused by `items`.
    ///
    /// Callers check ids against [`MAX_ID`] first, so the addition cannot
    /// saturate in practice.
    fn items_floor(&self, items: &[InventoryItem]) -> u64 {
        items
            .iter()
            .map(|i| i.id_typed().get().saturating_add(1))
            .max()
            .unwrap_or(1)
    }

    fn write_state(&self) -> Result<(), StorageError> {
        let inventory = serde_json::to_string(&self.items)
            .map_err(|e| StorageError::codec(keys::INVENTORY, e))?;
        let bills = serde_json::to_string(&self.bills)
            .map_err(|e| StorageError::codec(keys::SCANNED_BILLS, e))?;
        let settings = serde_json::to_string(&self.settings)
            .map_err(|e| StorageError::codec(keys::SETTINGS, e))?;

        self.storage.set_many(&[
            (keys::INVENTORY, inventory),
            (keys::SCANNED_BILLS, bills),
            (keys::SETTINGS, settings),
            (keys::NEXT_ID, self.next_id.to_string()),
        ])
    }

    fn persist(&self) {
        if let Err(err) = self.write_state() {
            tracing::error!(error = %err, "failed to persist inventory; continuing in memory");
        }
    }

    fn clear_state(&mut self) {
        self.items.clear();
        self.bills.clear();
        self.next_id = 1;
        self.settings = Settings::default();
    }

    fn seed_sample_data(&mut self) {
        for new in seed::sample_items() {
            let item = self.create_item(new);
            self.items.push(item);
        }
        self.persist();
    }

    fn create_item(&mut self, new: NewItem) -> InventoryItem {
        let id = ItemId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        InventoryItem::create(id, new, self.config.default_reorder_level)
    }

    // ---------------------------------------------------------------------
    // Items
    // ---------------------------------------------------------------------

    /// Assign the next id, append and persist.
    pub fn add_item(&mut self, new: NewItem) -> InventoryItem {
        let item = self.create_item(new);
        tracing::debug!(item_id = %item.id_typed(), name = item.name(), "item added");
        self.items.push(item.clone());
        self.persist();
        item
    }

    pub fn update_item(&mut self, id: ItemId, patch: ItemPatch) -> Option<InventoryItem> {
        let idx = position_of(&self.items, id)?;
        self.items[idx].apply_patch(patch);
        tracing::debug!(item_id = %id, "item updated");
        self.persist();
        Some(self.items[idx].clone())
    }

    pub fn delete_item(&mut self, id: ItemId) -> Option<InventoryItem> {
        let idx = position_of(&self.items, id)?;
        let removed = self.items.remove(idx);
        tracing::debug!(item_id = %id, "item deleted");
        self.persist();
        Some(removed)
    }

    pub fn get_item(&self, id: ItemId) -> Option<InventoryItem> {
        position_of(&self.items, id).map(|idx| self.items[idx].clone())
    }

    /// Owned copy of every item, in storage order.
    pub fn get_all_items(&self) -> Vec<InventoryItem> {
        self.items.clone()
    }

    /// Borrowed view of every item, in storage order.
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// Add `delta` to the item's quantity, clamping at zero.
    pub fn update_quantity(&mut self, id: ItemId, delta: i64) -> Option<InventoryItem> {
        let idx = position_of(&self.items, id)?;
        let quantity = self.items[idx].adjust_quantity(delta);
        tracing::debug!(item_id = %id, delta, quantity, "quantity adjusted");
        self.persist();
        Some(self.items[idx].clone())
    }

    /// Case-insensitive substring search over name, category and sku.
    pub fn search_items(&self, query: &str) -> Vec<InventoryItem> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.matches_lowercase(&needle))
            .cloned()
            .collect()
    }

    /// Items of `category`; every item when `category` is `None`.
    pub fn filter_by_category(&self, category: Option<Category>) -> Vec<InventoryItem> {
        match category {
            None => self.get_all_items(),
            Some(category) => self
                .items
                .iter()
                .filter(|item| item.category() == category)
                .cloned()
                .collect(),
        }
    }

    /// Items strictly below their reorder level, in storage order.
    pub fn get_low_stock_items(&self) -> Vec<InventoryItem> {
        self.items
            .iter()
            .filter(|item| item.is_low_stock())
            .cloned()
            .collect()
    }

    // ---------------------------------------------------------------------
    // Scanned bills
    // ---------------------------------------------------------------------

    /// Record a scan result. The id is the current epoch time in milliseconds,
    /// bumped past the newest existing bill id if needed.
    pub fn add_scanned_bill(&mut self, new: NewBill) -> ScannedBill {
        let now = Utc::now();
        let clock_id = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let newest = self.bills.iter().map(|b| b.id_typed().get()).max();
        let id = match newest {
            Some(newest) if newest >= clock_id => newest.saturating_add(1),
            _ => clock_id,
        };

        let bill = ScannedBill::create(BillId::new(id), new, now);
        tracing::debug!(
            bill_id = %bill.id_typed(),
            filename = bill.filename(),
            lines = bill.items().len(),
            "scanned bill recorded"
        );
        self.bills.push(bill.clone());
        self.persist();
        bill
    }

    pub fn delete_scanned_bill(&mut self, id: BillId) -> Option<ScannedBill> {
        let idx = position_of(&self.bills, id)?;
        let removed = self.bills.remove(idx);
        tracing::debug!(bill_id = %id, "scanned bill deleted");
        self.persist();
        Some(removed)
    }

    pub fn get_scanned_bill(&self, id: BillId) -> Option<ScannedBill> {
        position_of(&self.bills, id).map(|idx| self.bills[idx].clone())
    }

    pub fn get_all_scanned_bills(&self) -> Vec<ScannedBill> {
        self.bills.clone()
    }

    /// Drop every scanned bill; returns how many were removed.
    pub fn clear_scanned_bills(&mut self) -> usize {
        let removed = self.bills.len();
        self.bills.clear();
        tracing::debug!(removed, "scanned bills cleared");
        self.persist();
        removed
    }

    /// Merge every line of a bill into the inventory.
    ///
    /// A line tops up the first item with the same name (case-insensitive) and
    /// category, or becomes a new item with the default reorder level. The
    /// bill itself is kept.
    pub fn merge_scanned_bill(&mut self, id: BillId) -> Option<MergeReport> {
        let idx = position_of(&self.bills, id)?;
        let lines = self.bills[idx].items().to_vec();

        let mut report = MergeReport {
            bill_id: id,
            updated: 0,
            created: 0,
            items: Vec::with_capacity(lines.len()),
        };

        for line in &lines {
            let existing = self
                .items
                .iter()
                .position(|item| item.is_same_product(&line.name, line.category));
            match existing {
                Some(pos) => {
                    self.items[pos].adjust_quantity(i64::from(line.quantity));
                    report.updated += 1;
                    report.items.push(self.items[pos].clone());
                }
                None => {
                    let item = self.create_item(line.to_new_item());
                    report.created += 1;
                    report.items.push(item.clone());
                    self.items.push(item);
                }
            }
        }

        tracing::info!(
            bill_id = %id,
            updated = report.updated,
            created = report.created,
            "scanned bill merged into inventory"
        );
        self.persist();
        Some(report)
    }

    // ---------------------------------------------------------------------
    // Aggregates
    // ---------------------------------------------------------------------

    pub fn get_total_items(&self) -> usize {
        self.items.len()
    }

    /// Σ quantity × price.
    pub fn get_total_value(&self) -> f64 {
        self.items.iter().map(InventoryItem::total_value).sum()
    }

    pub fn get_low_stock_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_low_stock()).count()
    }

    pub fn get_category_data(&self) -> CategoryBreakdown {
        CategoryBreakdown::from_items(&self.items)
    }

    /// Mean seasonal growth over all items, in percent. Zero for an empty inventory.
    pub fn get_predicted_growth(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .items
            .iter()
            .map(|item| (self.calendar.multiplier(item.category()) - 1.0) * 100.0)
            .sum();
        total / self.items.len() as f64
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats {
            total_items: self.get_total_items(),
            total_value: self.get_total_value(),
            low_stock_count: self.get_low_stock_count(),
            predicted_growth: self.get_predicted_growth(),
        }
    }

    // ---------------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------------

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Settings {
        self.settings.merge(patch);
        self.persist();
        self.settings
    }

    pub fn get_settings(&self) -> Settings {
        self.settings
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Clear everything, restore default settings and reseed the sample data.
    pub fn reset_all_data(&mut self) {
        self.clear_state();
        self.persist();
        self.seed_sample_data();
        tracing::info!(items = self.items.len(), next_id = self.next_id, "all data reset");
    }

    pub fn export_snapshot(&self) -> ExportSnapshot {
        ExportSnapshot {
            inventory: self.items.clone(),
            scanned_bills: self.bills.clone(),
            export_date: Utc::now(),
            version: self.config.version.clone(),
        }
    }

    /// Pretty-printed JSON of [`Store::export_snapshot`].
    pub fn export_to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.export_snapshot())
    }

    pub fn export_to_csv(&self) -> Result<String, csv::Error> {
        export::inventory_csv(&self.items)
    }

    /// Replace items and bills with the contents of an export.
    ///
    /// Settings are kept. The id counter moves past the highest imported item
    /// id and never backwards.
    pub fn import_snapshot(&mut self, snapshot: ExportSnapshot) -> DomainResult<()> {
        check_ids(snapshot.inventory.iter().map(|i| i.id_typed().get()), "item")
            .map_err(DomainError::validation)?;
        check_ids(snapshot.scanned_bills.iter().map(|b| b.id_typed().get()), "bill")
            .map_err(DomainError::validation)?;

        let floor = self.items_floor(&snapshot.inventory);
        self.next_id = self.next_id.max(floor);
        self.items = snapshot.inventory;
        self.bills = snapshot.scanned_bills;
        tracing::info!(
            items = self.items.len(),
            bills = self.bills.len(),
            version = %snapshot.version,
            "snapshot imported"
        );
        self.persist();
        Ok(())
    }

    /// Parse and import a JSON export.
    pub fn import_json(&mut self, json: &str) -> DomainResult<()> {
        let snapshot: ExportSnapshot = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("invalid export: {e}")))?;
        self.import_snapshot(snapshot)
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn calendar(&self) -> &SeasonalCalendar {
        &self.calendar
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Ids must be unique, non-zero and within [`MAX_ID`].
fn check_ids(ids: impl Iterator<Item = u64>, kind: &str) -> Result<(), String> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if id == 0 || id > MAX_ID {
            return Err(format!("{kind} id {id} is outside 1..={MAX_ID}"));
        }
        if !seen.insert(id) {
            return Err(format!("duplicate {kind} id {id}"));
        }
    }
    Ok(())
}
