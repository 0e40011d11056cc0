//! Settings-gated alerts surfaced as notifications.

use serde::{Deserialize, Serialize};

use smartstock_inventory::{InventoryItem, Settings};

use crate::insight::Insight;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    /// A critical seasonal insight.
    Seasonal,
    /// Summary of items that are critically low.
    LowStock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// Build the alerts enabled by `settings`.
///
/// With `seasonal_alerts`, one alert per critical insight, in insight order.
/// With `low_stock_alerts`, a single summary counting low-stock items whose
/// quantity is below `critical_quantity`, omitted when that count is zero.
pub fn alerts(
    settings: &Settings,
    insights: &[Insight],
    low_stock: &[&InventoryItem],
    critical_quantity: u32,
) -> Vec<Alert> {
    let mut out = Vec::new();

    if settings.seasonal_alerts {
        out.extend(insights.iter().filter(|i| i.is_critical()).map(|i| Alert {
            kind: AlertKind::Seasonal,
            message: i.message.clone(),
        }));
    }

    if settings.low_stock_alerts {
        let critical = low_stock
            .iter()
            .filter(|item| item.quantity() < critical_quantity)
            .count();
        if critical > 0 {
            out.push(Alert {
                kind: AlertKind::LowStock,
                message: format!("{critical} item(s) are critically low in stock!"),
            });
        }
    }

    out
}
