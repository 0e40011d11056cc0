//! Commands the UI layer invokes.
//!
//! Every command takes loosely-typed input, runs it through the validation
//! boundary, and reports failures as display strings the frontend can show
//! directly.

use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;
use serde::{Deserialize, Serialize};

use smartstock_ai::{Alert, CategoryPrediction, Forecaster, Insight, PredictionsSnapshot, ReorderRecommendation};
use smartstock_core::{BillId, Category, DomainError, InventoryConfig, ItemId, SeasonalCalendar, UploadLimits};
use smartstock_inventory::{
    BillInput, CategoryBreakdown, InventoryItem, ItemInput, ItemPatchInput, ScannedBill, Settings,
    SettingsPatch, UploadBatch, UploadFile, validate_bill, validate_item, validate_patch,
    validate_upload,
};
use smartstock_store::{
    ExportFormat, InMemoryStorage, InventoryStats, KeyValueStorage, MergeReport, SqliteStorage,
    Store, export_filename,
};

use crate::config::AppConfig;

/// Storage backend chosen at startup.
pub type DynStorage = Box<dyn KeyValueStorage + Send>;

/// Application state shared across commands.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<Store<DynStorage>>>,
    upload_limits: UploadLimits,
}

impl AppState {
    /// Open the backend described by `config` and load the store.
    pub fn open(config: &AppConfig) -> anyhow::Result<Self> {
        let storage: DynStorage = if config.in_memory {
            tracing::info!("using in-memory storage");
            Box::new(InMemoryStorage::new())
        } else {
            tracing::info!(path = %config.db_path.display(), "opening sqlite storage");
            Box::new(SqliteStorage::open(&config.db_path)?)
        };
        Ok(Self::with_storage(storage, config.inventory.clone(), config.calendar()))
    }

    /// Ephemeral state backed by process memory.
    pub fn in_memory(calendar: SeasonalCalendar) -> Self {
        Self::with_storage(
            Box::new(InMemoryStorage::new()),
            InventoryConfig::default(),
            calendar,
        )
    }

    pub fn with_storage(storage: DynStorage, config: InventoryConfig, calendar: SeasonalCalendar) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::with_config(storage, config, calendar))),
            upload_limits: UploadLimits::default(),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, Store<DynStorage>>, String> {
        self.store
            .lock()
            .map_err(|_| "store lock poisoned".to_string())
    }

    fn forecast<T>(
        &self,
        f: impl FnOnce(&Forecaster<&Store<DynStorage>>) -> T,
    ) -> Result<T, String> {
        let store = self.store()?;
        let forecaster = Forecaster::new(&*store, store.calendar().clone())
            .with_critical_quantity(store.config().critical_stock_quantity);
        Ok(f(&forecaster))
    }
}

/// File contents plus the name and type a download should use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub filename: String,
    pub mime_type: String,
    pub contents: String,
}

fn to_message(err: impl Display) -> String {
    err.to_string()
}

fn parse_item_id(raw: &str) -> Result<ItemId, String> {
    raw.parse::<ItemId>()
        .map_err(|e| format!("Invalid item_id: {e}"))
}

fn parse_bill_id(raw: &str) -> Result<BillId, String> {
    raw.parse::<BillId>()
        .map_err(|e| format!("Invalid bill_id: {e}"))
}

fn found<T>(value: Option<T>, what: &str, id: impl Display) -> Result<T, String> {
    value.ok_or_else(|| format!("{what} {id}: {}", DomainError::not_found()))
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

pub fn list_inventory_items(state: &AppState) -> Result<Vec<InventoryItem>, String> {
    Ok(state.store()?.get_all_items())
}

pub fn get_item(state: &AppState, item_id: &str) -> Result<InventoryItem, String> {
    let id = parse_item_id(item_id)?;
    found(state.store()?.get_item(id), "item", id)
}

pub fn add_item(state: &AppState, input: ItemInput) -> Result<InventoryItem, String> {
    let new = validate_item(&input).map_err(to_message)?;
    let item = state.store()?.add_item(new);
    tracing::info!(item_id = %item.id_typed(), "item added");
    Ok(item)
}

pub fn update_item(
    state: &AppState,
    item_id: &str,
    input: ItemPatchInput,
) -> Result<InventoryItem, String> {
    let id = parse_item_id(item_id)?;
    let patch = validate_patch(&input).map_err(to_message)?;
    found(state.store()?.update_item(id, patch), "item", id)
}

pub fn delete_item(state: &AppState, item_id: &str) -> Result<InventoryItem, String> {
    let id = parse_item_id(item_id)?;
    found(state.store()?.delete_item(id), "item", id)
}

/// Add `delta` (possibly negative) to an item's quantity.
pub fn adjust_stock(state: &AppState, item_id: &str, delta: i64) -> Result<InventoryItem, String> {
    let id = parse_item_id(item_id)?;
    found(state.store()?.update_quantity(id, delta), "item", id)
}

pub fn search_items(state: &AppState, query: &str) -> Result<Vec<InventoryItem>, String> {
    Ok(state.store()?.search_items(query))
}

/// Filter by category name; empty or `"all"` returns everything.
pub fn filter_by_category(state: &AppState, category: &str) -> Result<Vec<InventoryItem>, String> {
    let category = match category.trim() {
        "" => None,
        c if c.eq_ignore_ascii_case("all") => None,
        c => Some(c.parse::<Category>().map_err(to_message)?),
    };
    Ok(state.store()?.filter_by_category(category))
}

pub fn get_low_stock_items(state: &AppState) -> Result<Vec<InventoryItem>, String> {
    Ok(state.store()?.get_low_stock_items())
}

pub fn get_stats(state: &AppState) -> Result<InventoryStats, String> {
    Ok(state.store()?.stats())
}

pub fn get_category_data(state: &AppState) -> Result<CategoryBreakdown, String> {
    Ok(state.store()?.get_category_data())
}

// ---------------------------------------------------------------------------
// Scanned bills
// ---------------------------------------------------------------------------

/// Split an upload batch into files to scan and files to skip.
pub fn check_upload(state: &AppState, files: Vec<UploadFile>) -> Result<UploadBatch, String> {
    let batch = validate_upload(&files, &state.upload_limits).map_err(to_message)?;
    for (name, reason) in &batch.rejected {
        tracing::warn!(file = %name, ?reason, "upload rejected");
    }
    Ok(batch)
}

pub fn add_scanned_bill(state: &AppState, input: BillInput) -> Result<ScannedBill, String> {
    let bill = validate_bill(&input).map_err(to_message)?;
    Ok(state.store()?.add_scanned_bill(bill))
}

pub fn list_scanned_bills(state: &AppState) -> Result<Vec<ScannedBill>, String> {
    Ok(state.store()?.get_all_scanned_bills())
}

pub fn delete_scanned_bill(state: &AppState, bill_id: &str) -> Result<ScannedBill, String> {
    let id = parse_bill_id(bill_id)?;
    found(state.store()?.delete_scanned_bill(id), "bill", id)
}

pub fn merge_scanned_bill(state: &AppState, bill_id: &str) -> Result<MergeReport, String> {
    let id = parse_bill_id(bill_id)?;
    found(state.store()?.merge_scanned_bill(id), "bill", id)
}

pub fn clear_scanned_bills(state: &AppState) -> Result<usize, String> {
    Ok(state.store()?.clear_scanned_bills())
}

// ---------------------------------------------------------------------------
// Settings and data management
// ---------------------------------------------------------------------------

pub fn get_settings(state: &AppState) -> Result<Settings, String> {
    Ok(state.store()?.get_settings())
}

pub fn update_settings(state: &AppState, patch: SettingsPatch) -> Result<Settings, String> {
    Ok(state.store()?.update_settings(patch))
}

pub fn reset_all_data(state: &AppState) -> Result<InventoryStats, String> {
    let mut store = state.store()?;
    store.reset_all_data();
    Ok(store.stats())
}

/// Export the inventory as `"csv"` or `"json"`.
pub fn export_inventory(state: &AppState, format: &str) -> Result<ExportPayload, String> {
    let format = match format.trim().to_ascii_lowercase().as_str() {
        "csv" => ExportFormat::Csv,
        "json" => ExportFormat::Json,
        other => return Err(format!("unsupported export format: {other}")),
    };

    let store = state.store()?;
    let contents = match format {
        ExportFormat::Csv => store.export_to_csv().map_err(to_message)?,
        ExportFormat::Json => store.export_to_json().map_err(to_message)?,
    };
    Ok(ExportPayload {
        filename: export_filename(format, Local::now().date_naive()),
        mime_type: format.mime_type().to_string(),
        contents,
    })
}

/// Replace items and bills with a JSON export.
pub fn import_inventory(state: &AppState, json: &str) -> Result<InventoryStats, String> {
    let mut store = state.store()?;
    store.import_json(json).map_err(to_message)?;
    Ok(store.stats())
}

// ---------------------------------------------------------------------------
// Forecasts
// ---------------------------------------------------------------------------

pub fn get_predictions(state: &AppState) -> Result<PredictionsSnapshot, String> {
    state.forecast(|f| f.export_predictions())
}

pub fn get_ranked_predictions(state: &AppState) -> Result<Vec<CategoryPrediction>, String> {
    state.forecast(|f| f.ranked_predictions())
}

pub fn get_insights(state: &AppState) -> Result<Vec<Insight>, String> {
    state.forecast(|f| f.insights())
}

pub fn get_reorder_recommendations(state: &AppState) -> Result<Vec<ReorderRecommendation>, String> {
    state.forecast(|f| f.reorder_recommendations())
}

/// Alerts enabled by the current settings.
pub fn get_alerts(state: &AppState) -> Result<Vec<Alert>, String> {
    let settings = get_settings(state)?;
    state.forecast(|f| f.alerts(&settings))
}
