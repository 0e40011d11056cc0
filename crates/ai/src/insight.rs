//! Insights the forecaster emits about categories and low-stock items.

use serde::{Deserialize, Serialize};

use smartstock_core::{Category, ItemId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Category in strong season; worth stocking up.
    Opportunity,
    /// Category out of season; holding costs outweigh demand.
    Warning,
    /// Low-stock item during peak season.
    Critical,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
}

/// Forecast insight.
///
/// This is a view model for the presentation layer, not stored state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub category: Category,
    /// Set for item-level insights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    pub message: String,
    pub priority: Priority,
}

impl Insight {
    pub fn opportunity(category: Category, percent: i64) -> Self {
        Self {
            kind: InsightKind::Opportunity,
            category,
            item_id: None,
            message: format!("{category} is in peak season (+{percent}%). Consider stocking up."),
            priority: Priority::High,
        }
    }

    pub fn warning(category: Category, percent: i64) -> Self {
        Self {
            kind: InsightKind::Warning,
            category,
            item_id: None,
            message: format!(
                "{category} is in off-season ({percent}%). Reduce inventory to minimize holding costs."
            ),
            priority: Priority::Medium,
        }
    }

    pub fn critical(category: Category, item_id: ItemId, item_name: &str) -> Self {
        Self {
            kind: InsightKind::Critical,
            category,
            item_id: Some(item_id),
            message: format!("{item_name} is low in stock during peak season. Reorder immediately."),
            priority: Priority::Critical,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.priority == Priority::Critical
    }
}
