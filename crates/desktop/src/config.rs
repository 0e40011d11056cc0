//! Host configuration read from the environment.

use std::path::PathBuf;

use anyhow::Context;

use smartstock_core::{InventoryConfig, Season, SeasonalCalendar};

pub const DB_PATH_ENV: &str = "SMARTSTOCK_DB_PATH";
pub const DEFAULT_REORDER_LEVEL_ENV: &str = "SMARTSTOCK_DEFAULT_REORDER_LEVEL";
pub const SEASON_ENV: &str = "SMARTSTOCK_SEASON";
pub const IN_MEMORY_ENV: &str = "SMARTSTOCK_IN_MEMORY";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite database file; ignored when `in_memory` is set.
    pub db_path: PathBuf,
    /// Keep all data in process memory (nothing survives a restart).
    pub in_memory: bool,
    pub inventory: InventoryConfig,
    /// Fixed season; `None` follows the system clock.
    pub season: Option<Season>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let db_path = match lookup(DB_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        let mut inventory = InventoryConfig::default();
        if let Some(raw) = lookup(DEFAULT_REORDER_LEVEL_ENV) {
            let level = raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{DEFAULT_REORDER_LEVEL_ENV} must be a non-negative integer, got {raw:?}"))?;
            inventory = inventory.with_default_reorder_level(level);
        }

        let season = lookup(SEASON_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(|raw| raw.parse::<Season>())
            .transpose()
            .with_context(|| format!("invalid {SEASON_ENV}"))?;

        let in_memory = lookup(IN_MEMORY_ENV)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            db_path,
            in_memory,
            inventory,
            season,
        })
    }

    pub fn calendar(&self) -> SeasonalCalendar {
        match self.season {
            Some(season) => SeasonalCalendar::fixed(season),
            None => SeasonalCalendar::default(),
        }
    }
}

/// `{app_data_dir}/smartstock/smartstock.db`.
fn default_db_path() -> anyhow::Result<PathBuf> {
    let mut path = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;
    path.push("smartstock");
    path.push("smartstock.db");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn explicit_values() {
        let config = AppConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "/tmp/stock.db"),
            (DEFAULT_REORDER_LEVEL_ENV, "25"),
            (SEASON_ENV, "Summer"),
            (IN_MEMORY_ENV, "true"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/stock.db"));
        assert_eq!(config.inventory.default_reorder_level, 25);
        assert_eq!(config.season, Some(Season::Summer));
        assert!(config.in_memory);
        assert_eq!(config.calendar().current_season(), Season::Summer);
    }

    #[test]
    fn defaults_when_unset() {
        let Ok(config) = AppConfig::from_lookup(lookup(&[])) else {
            // no resolvable data dir in this environment
            return;
        };
        assert!(config.db_path.ends_with("smartstock/smartstock.db"));
        assert_eq!(config.inventory, InventoryConfig::default());
        assert_eq!(config.season, None);
        assert!(!config.in_memory);
    }

    #[test]
    fn rejects_malformed_values() {
        let bad_level = AppConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "/tmp/x.db"),
            (DEFAULT_REORDER_LEVEL_ENV, "-3"),
        ]));
        assert!(bad_level.is_err());

        let bad_season = AppConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "/tmp/x.db"),
            (SEASON_ENV, "monsoon"),
        ]));
        assert!(bad_season.is_err());
    }
}
