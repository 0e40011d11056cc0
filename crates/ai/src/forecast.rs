//! Seasonal forecaster: predictions, insights and reorder recommendations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartstock_core::config::CRITICAL_STOCK_QUANTITY;
use smartstock_core::{Category, Season, SeasonalCalendar};
use smartstock_inventory::{CategoryBreakdown, InventoryItem, Settings};

use crate::alerts::{self, Alert};
use crate::indicator::{PEAK_THRESHOLD, SeasonalIndicator, percent_change, seasonal_indicator};
use crate::insight::Insight;
use crate::reader::InventoryReader;

/// Multiplier at or above which a category is flagged as an opportunity.
const OPPORTUNITY_THRESHOLD: f64 = 1.3;
/// Multiplier at or below which a category is flagged as off-season.
const OFF_SEASON_THRESHOLD: f64 = 0.9;

/// Reorder urgency. Declaration order is sort order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    /// Not produced by the current rules.
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRecommendation {
    pub item: InventoryItem,
    pub current_stock: u32,
    pub recommended_reorder: u64,
    pub reason: String,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPrediction {
    pub category: Category,
    pub current_value: f64,
    pub predicted_value: f64,
    pub seasonal_multiplier: f64,
    pub current_season: Season,
    pub item_count: usize,
    pub total_quantity: u64,
}

impl CategoryPrediction {
    /// Growth in percent implied by the multiplier.
    pub fn growth_percent(&self) -> f64 {
        (self.seasonal_multiplier - 1.0) * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionsSnapshot {
    pub predictions: Vec<CategoryPrediction>,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<ReorderRecommendation>,
    pub generated_at: DateTime<Utc>,
}

/// Stateless forecasting over whatever `R` currently holds.
///
/// Every call reads the inventory afresh; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Forecaster<R> {
    reader: R,
    calendar: SeasonalCalendar,
    critical_quantity: u32,
}

impl<R: InventoryReader> Forecaster<R> {
    pub fn new(reader: R, calendar: SeasonalCalendar) -> Self {
        Self {
            reader,
            calendar,
            critical_quantity: CRITICAL_STOCK_QUANTITY,
        }
    }

    /// Quantity below which a low-stock item is urgent.
    pub fn with_critical_quantity(mut self, quantity: u32) -> Self {
        self.critical_quantity = quantity;
        self
    }

    pub fn calendar(&self) -> &SeasonalCalendar {
        &self.calendar
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn current_season(&self) -> Season {
        self.calendar.current_season()
    }

    pub fn seasonal_multiplier(&self, category: Category) -> f64 {
        self.calendar.multiplier(category)
    }

    pub fn seasonal_indicator(&self, category: Category) -> SeasonalIndicator {
        seasonal_indicator(self.seasonal_multiplier(category))
    }

    /// One prediction per category present, in first-appearance order.
    pub fn predictions(&self) -> Vec<CategoryPrediction> {
        let season = self.current_season();
        CategoryBreakdown::from_items(self.reader.inventory())
            .iter()
            .map(|summary| {
                let multiplier = self.calendar.table().multiplier(summary.category, season);
                CategoryPrediction {
                    category: summary.category,
                    current_value: summary.value,
                    predicted_value: summary.value * multiplier,
                    seasonal_multiplier: multiplier,
                    current_season: season,
                    item_count: summary.items.len(),
                    total_quantity: summary.quantity,
                }
            })
            .collect()
    }

    /// Predictions sorted by predicted value, highest first. Ties keep
    /// first-appearance order.
    pub fn ranked_predictions(&self) -> Vec<CategoryPrediction> {
        let mut ranked = self.predictions();
        ranked.sort_by(|a, b| b.predicted_value.total_cmp(&a.predicted_value));
        ranked
    }

    /// Category insights first (first-appearance order), then one critical
    /// insight per low-stock item in peak season (storage order).
    pub fn insights(&self) -> Vec<Insight> {
        let season = self.current_season();
        let table = self.calendar.table();
        let items = self.reader.inventory();
        let mut insights = Vec::new();

        for category in CategoryBreakdown::from_items(items).categories() {
            let multiplier = table.multiplier(category, season);
            if multiplier >= OPPORTUNITY_THRESHOLD {
                insights.push(Insight::opportunity(category, percent_change(multiplier)));
            } else if multiplier <= OFF_SEASON_THRESHOLD {
                insights.push(Insight::warning(category, percent_change(multiplier)));
            }
        }

        for item in self.reader.low_stock_items() {
            if table.multiplier(item.category(), season) >= PEAK_THRESHOLD {
                insights.push(Insight::critical(item.category(), item.id_typed(), item.name()));
            }
        }

        insights
    }

    /// One recommendation per low-stock item, most urgent first.
    ///
    /// The suggested quantity is `ceil(reorder_level * 2 * multiplier)`.
    pub fn reorder_recommendations(&self) -> Vec<ReorderRecommendation> {
        let season = self.current_season();
        let table = self.calendar.table();

        let mut recommendations: Vec<ReorderRecommendation> = self
            .reader
            .low_stock_items()
            .into_iter()
            .map(|item| {
                let multiplier = table.multiplier(item.category(), season);
                let indicator = seasonal_indicator(multiplier);
                let base = u64::from(item.reorder_level()) * 2;
                ReorderRecommendation {
                    item: item.clone(),
                    current_stock: item.quantity(),
                    recommended_reorder: (base as f64 * multiplier).ceil() as u64,
                    reason: format!(
                        "{} - {} demand adjustment",
                        indicator.label, indicator.percentage
                    ),
                    urgency: if item.quantity() < self.critical_quantity {
                        Urgency::High
                    } else {
                        Urgency::Medium
                    },
                }
            })
            .collect();

        recommendations.sort_by_key(|r| r.urgency);
        recommendations
    }

    pub fn export_predictions(&self) -> PredictionsSnapshot {
        let snapshot = PredictionsSnapshot {
            predictions: self.predictions(),
            insights: self.insights(),
            recommendations: self.reorder_recommendations(),
            generated_at: Utc::now(),
        };
        tracing::debug!(
            season = %self.current_season(),
            categories = snapshot.predictions.len(),
            insights = snapshot.insights.len(),
            recommendations = snapshot.recommendations.len(),
            "predictions exported"
        );
        snapshot
    }

    /// Alerts the presentation layer should surface under `settings`.
    pub fn alerts(&self, settings: &Settings) -> Vec<Alert> {
        alerts::alerts(
            settings,
            &self.insights(),
            &self.reader.low_stock_items(),
            self.critical_quantity,
        )
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use smartstock_core::ItemId;
    use smartstock_inventory::NewItem;

    use super::*;
    use crate::insight::{InsightKind, Priority};

    fn item(id: u64, name: &str, category: Category, quantity: u32, price: f64) -> InventoryItem {
        InventoryItem::create(ItemId::new(id), NewItem::new(name, category, quantity, price), 10)
    }

    /// Winter multipliers: Electronics 1.3, Toys 1.5, Sports 0.8, Home 0.9, Food 1.0.
    fn winter_items() -> Vec<InventoryItem> {
        vec![
            item(1, "Headphones", Category::Electronics, 7, 50.0),
            item(2, "Doll", Category::Toys, 2, 10.0),
            item(3, "Ball", Category::Sports, 40, 5.0),
            item(4, "Lamp", Category::Home, 3, 20.0),
            item(5, "Bread", Category::Food, 50, 2.0),
        ]
    }

    fn winter(items: Vec<InventoryItem>) -> Forecaster<Vec<InventoryItem>> {
        Forecaster::new(items, SeasonalCalendar::fixed(Season::Winter))
    }

    #[test]
    fn insights_cover_categories_then_peak_low_stock_items() {
        let insights = winter(winter_items()).insights();

        let summary: Vec<_> = insights
            .iter()
            .map(|i| (i.kind, i.category, i.priority))
            .collect();
        assert_eq!(
            summary,
            vec![
                (InsightKind::Opportunity, Category::Electronics, Priority::High),
                (InsightKind::Opportunity, Category::Toys, Priority::High),
                (InsightKind::Warning, Category::Sports, Priority::Medium),
                (InsightKind::Warning, Category::Home, Priority::Medium),
                (InsightKind::Critical, Category::Electronics, Priority::Critical),
                (InsightKind::Critical, Category::Toys, Priority::Critical),
            ]
        );

        assert_eq!(
            insights[0].message,
            "Electronics is in peak season (+30%). Consider stocking up."
        );
        assert_eq!(
            insights[3].message,
            "Home is in off-season (-10%). Reduce inventory to minimize holding costs."
        );
        assert_eq!(
            insights[5].message,
            "Doll is low in stock during peak season. Reorder immediately."
        );
        assert_eq!(insights[5].item_id, Some(ItemId::new(2)));
    }

    #[test]
    fn recommendations_sorted_by_urgency_keeping_storage_order() {
        let recs = winter(winter_items()).reorder_recommendations();

        let summary: Vec<_> = recs
            .iter()
            .map(|r| (r.item.name(), r.current_stock, r.recommended_reorder, r.urgency))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Doll", 2, 30, Urgency::High),
                ("Lamp", 3, 18, Urgency::High),
                ("Headphones", 7, 26, Urgency::Medium),
            ]
        );
        assert_eq!(recs[0].reason, "Peak Season - +50% demand adjustment");
        assert_eq!(recs[1].reason, "Off Season - -10% demand adjustment");
    }

    #[test]
    fn exactly_peak_multiplier_is_critical_without_category_insight() {
        // Beauty is 1.2 in winter: peak for items, below the opportunity threshold.
        let insights = winter(vec![item(1, "Lipstick", Category::Beauty, 3, 9.0)]).insights();

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Critical);
        assert_eq!(insights[0].priority, Priority::Critical);
        assert_eq!(insights[0].category, Category::Beauty);
    }

    #[test]
    fn item_at_its_reorder_level_gets_no_recommendation() {
        // Electronics is 1.3 in winter.
        let forecaster = winter(vec![item(1, "Tablet", Category::Electronics, 10, 300.0)]);

        assert!(forecaster.reorder_recommendations().is_empty());
        let insights = forecaster.insights();
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Opportunity);
    }

    #[test]
    fn critical_quantity_is_configurable() {
        let recs = winter(winter_items())
            .with_critical_quantity(8)
            .reorder_recommendations();
        assert!(recs.iter().all(|r| r.urgency == Urgency::High));
    }

    #[test]
    fn predictions_follow_first_appearance_and_rank_by_value() {
        let forecaster = winter(winter_items());

        let predictions = forecaster.predictions();
        let order: Vec<_> = predictions.iter().map(|p| p.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Electronics,
                Category::Toys,
                Category::Sports,
                Category::Home,
                Category::Food
            ]
        );
        let electronics = &predictions[0];
        assert_eq!(electronics.current_value, 350.0);
        assert!((electronics.predicted_value - 455.0).abs() < 1e-9);
        assert_eq!(electronics.current_season, Season::Winter);
        assert_eq!(electronics.item_count, 1);
        assert_eq!(electronics.total_quantity, 7);

        let ranked: Vec<_> = forecaster
            .ranked_predictions()
            .iter()
            .map(|p| p.category)
            .collect();
        assert_eq!(
            ranked,
            vec![
                Category::Electronics,
                Category::Sports,
                Category::Food,
                Category::Home,
                Category::Toys
            ]
        );
    }

    #[test]
    fn empty_inventory_yields_nothing() {
        let forecaster = winter(Vec::new());
        let snapshot = forecaster.export_predictions();
        assert!(snapshot.predictions.is_empty());
        assert!(snapshot.insights.is_empty());
        assert!(snapshot.recommendations.is_empty());
        assert!(forecaster.alerts(&Settings::default()).is_empty());
    }

    #[test]
    fn snapshot_serializes_with_camel_case_keys() {
        let snapshot = winter(winter_items()).export_predictions();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert!(json.get("generatedAt").is_some());
        let first = &json["predictions"][0];
        assert_eq!(first["category"], "Electronics");
        assert_eq!(first["currentSeason"], "winter");
        assert_eq!(first["itemCount"], 1);
        assert_eq!(json["insights"][0]["type"], "opportunity");
        assert_eq!(json["recommendations"][0]["urgency"], "high");
        assert_eq!(json["recommendations"][0]["recommendedReorder"], 30);
    }

    #[test]
    fn seasonal_indicator_uses_calendar() {
        let summer = Forecaster::new(winter_items(), SeasonalCalendar::fixed(Season::Summer));
        assert_eq!(summer.seasonal_multiplier(Category::Sports), 1.4);
        assert_eq!(summer.seasonal_indicator(Category::Sports).percentage, "+40%");
        assert_eq!(summer.current_season(), Season::Summer);
    }

    #[test]
    fn reads_through_a_borrowed_reader() {
        let items = winter_items();
        let forecaster = Forecaster::new(&items, SeasonalCalendar::fixed(Season::Winter));
        assert_eq!(forecaster.reorder_recommendations().len(), 3);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        #[test]
        fn recommendations_match_low_stock_and_stay_sorted(
            rows in prop::collection::vec((0usize..8, 0u32..40, 0u32..20), 0..30),
            season_idx in 0usize..4,
        ) {
            let seasons = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];
            let items: Vec<InventoryItem> = rows
                .iter()
                .enumerate()
                .map(|(i, &(cat, quantity, reorder))| {
                    InventoryItem::create(
                        ItemId::new(i as u64 + 1),
                        NewItem::new("P", Category::ALL[cat], quantity, 1.0)
                            .with_reorder_level(reorder),
                        10,
                    )
                })
                .collect();
            let low = items.iter().filter(|i| i.is_low_stock()).count();

            let forecaster = Forecaster::new(items, SeasonalCalendar::fixed(seasons[season_idx]));
            let recs = forecaster.reorder_recommendations();

            prop_assert_eq!(recs.len(), low);
            prop_assert!(recs.windows(2).all(|w| w[0].urgency <= w[1].urgency));
            for rec in &recs {
                let m = forecaster.seasonal_multiplier(rec.item.category());
                let exact = f64::from(rec.item.reorder_level()) * 2.0 * m;
                prop_assert!(rec.recommended_reorder as f64 >= exact - 1e-9);
                prop_assert!((rec.recommended_reorder as f64) < exact + 1.0);
            }
        }
    }
}
