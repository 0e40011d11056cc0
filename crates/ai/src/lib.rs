//! `smartstock-ai`
//!
//! **Responsibility:** seasonal forecasting over the current inventory.
//!
//! This crate never mutates the store:
//! - It reads items through [`InventoryReader`].
//! - It combines them with a [`smartstock_core::SeasonalCalendar`].
//! - It emits view models (predictions, insights, recommendations, alerts).

pub mod alerts;
pub mod forecast;
pub mod indicator;
pub mod insight;
pub mod reader;

pub use alerts::{Alert, AlertKind, alerts};
pub use forecast::{
    CategoryPrediction, Forecaster, PredictionsSnapshot, ReorderRecommendation, Urgency,
};
pub use indicator::{SeasonTier, SeasonalIndicator, seasonal_indicator};
pub use insight::{Insight, InsightKind, Priority};
pub use reader::InventoryReader;
