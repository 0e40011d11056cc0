//! Seasonal demand indicator shown next to categories and recommendations.

use serde::{Deserialize, Serialize};

/// Multiplier at or above which a category is in peak season.
pub const PEAK_THRESHOLD: f64 = 1.2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeasonTier {
    Peak,
    Normal,
    OffSeason,
}

impl SeasonTier {
    pub fn label(&self) -> &'static str {
        match self {
            SeasonTier::Peak => "Peak Season",
            SeasonTier::Normal => "Normal",
            SeasonTier::OffSeason => "Off Season",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonalIndicator {
    pub tier: SeasonTier,
    pub label: &'static str,
    /// Signed whole-percent adjustment, e.g. `"+30%"`, `"0%"`, `"-20%"`.
    pub percentage: String,
}

/// Classify a seasonal multiplier.
///
/// `m >= 1.2` is peak, `1.0 <= m < 1.2` normal, anything lower off-season.
/// A normal multiplier of exactly 1.0 reads `"0%"`.
pub fn seasonal_indicator(multiplier: f64) -> SeasonalIndicator {
    let tier = if multiplier >= PEAK_THRESHOLD {
        SeasonTier::Peak
    } else if multiplier >= 1.0 {
        SeasonTier::Normal
    } else {
        SeasonTier::OffSeason
    };

    let percent = percent_change(multiplier);
    let percentage = match tier {
        SeasonTier::Normal if multiplier <= 1.0 => "0%".to_string(),
        SeasonTier::Peak | SeasonTier::Normal => format!("+{percent}%"),
        SeasonTier::OffSeason => format!("{percent}%"),
    };

    SeasonalIndicator {
        tier,
        label: tier.label(),
        percentage,
    }
}

/// `round((m - 1) * 100)`.
pub(crate) fn percent_change(multiplier: f64) -> i64 {
    ((multiplier - 1.0) * 100.0).round() as i64
}
