//! User preferences.

use serde::{Deserialize, Serialize};

/// Flat set of boolean preferences.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub dark_mode: bool,
    pub show_animations: bool,
    pub low_stock_alerts: bool,
    pub seasonal_alerts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            show_animations: true,
            low_stock_alerts: true,
            seasonal_alerts: true,
        }
    }
}

impl Settings {
    /// Shallow merge: every flag present in `patch` overwrites the current one.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.dark_mode {
            self.dark_mode = v;
        }
        if let Some(v) = patch.show_animations {
            self.show_animations = v;
        }
        if let Some(v) = patch.low_stock_alerts {
            self.low_stock_alerts = v;
        }
        if let Some(v) = patch.seasonal_alerts {
            self.seasonal_alerts = v;
        }
    }
}

/// Partial settings update.
///
/// Also the shape settings are read back from storage with, so a blob written
/// by an older build that lacks a flag keeps that flag's default.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_animations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_alerts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonal_alerts: Option<bool>,
}
