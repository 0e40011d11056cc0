//! Seasons and the seasonal demand-multiplier table.

use std::collections::BTreeMap;

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Multiplier applied when a category has no entry in the table.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Calendar season.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Season for a 0-indexed month (January = 0).
    ///
    /// Spring covers 2..=4, summer 5..=7, fall 8..=10; everything else is winter.
    pub fn from_month0(month0: u32) -> Self {
        match month0 {
            2..=4 => Season::Spring,
            5..=7 => Season::Summer,
            8..=10 => Season::Fall,
            _ => Season::Winter,
        }
    }

    /// Season of the local wall clock.
    pub fn current() -> Self {
        Self::from_month0(Local::now().month0())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }

    /// Capitalized name for headings ("Winter").
    pub fn title(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl core::fmt::Display for Season {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Season {
    type Err = crate::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            other => Err(crate::error::DomainError::validation(format!(
                "unknown season: {other:?}"
            ))),
        }
    }
}

/// Demand multipliers of one category across the four seasons.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonMultipliers {
    pub winter: f64,
    pub spring: f64,
    pub summer: f64,
    pub fall: f64,
}

impl SeasonMultipliers {
    pub const fn new(winter: f64, spring: f64, summer: f64, fall: f64) -> Self {
        Self {
            winter,
            spring,
            summer,
            fall,
        }
    }

    pub fn for_season(&self, season: Season) -> f64 {
        match season {
            Season::Winter => self.winter,
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
        }
    }
}

/// Static category → season → multiplier table.
///
/// Lookups are total: a category missing from the table yields
/// [`DEFAULT_MULTIPLIER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalTable {
    entries: BTreeMap<Category, SeasonMultipliers>,
}

impl SeasonalTable {
    /// A table with no entries (every lookup is 1.0).
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace the multipliers of one category.
    pub fn with_entry(mut self, category: Category, multipliers: SeasonMultipliers) -> Self {
        self.entries.insert(category, multipliers);
        self
    }

    pub fn multiplier(&self, category: Category, season: Season) -> f64 {
        self.entries
            .get(&category)
            .map(|m| m.for_season(season))
            .unwrap_or(DEFAULT_MULTIPLIER)
    }

    pub fn entry(&self, category: Category) -> Option<&SeasonMultipliers> {
        self.entries.get(&category)
    }
}

impl Default for SeasonalTable {
    /// Historical seasonal trends shipped with the app.
    fn default() -> Self {
        use Category::*;
        Self::empty()
            // holiday shopping / back to school
            .with_entry(Electronics, SeasonMultipliers::new(1.3, 1.0, 0.9, 1.2))
            .with_entry(Clothing, SeasonMultipliers::new(1.4, 1.1, 0.8, 1.3))
            // BBQ season
            .with_entry(Food, SeasonMultipliers::new(1.0, 1.0, 1.1, 1.0))
            // spring cleaning, outdoor items
            .with_entry(Home, SeasonMultipliers::new(0.9, 1.3, 1.2, 1.0))
            .with_entry(Sports, SeasonMultipliers::new(0.8, 1.3, 1.4, 1.1))
            .with_entry(Beauty, SeasonMultipliers::new(1.2, 1.0, 1.1, 1.0))
            .with_entry(Books, SeasonMultipliers::new(1.1, 1.0, 0.9, 1.2))
            .with_entry(Toys, SeasonMultipliers::new(1.5, 0.9, 1.0, 1.3))
    }
}

/// Where the "current" season comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SeasonSource {
    /// Derive from the local clock at every lookup.
    #[default]
    Clock,
    /// Always report the given season.
    Fixed(Season),
}

/// Seasonal table paired with a season source.
///
/// Both the store (predicted growth) and the forecaster resolve multipliers
/// through a calendar, so a fixed season can be injected in one place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeasonalCalendar {
    table: SeasonalTable,
    source: SeasonSource,
}

impl SeasonalCalendar {
    pub fn new(table: SeasonalTable, source: SeasonSource) -> Self {
        Self { table, source }
    }

    /// Built-in table, pinned to `season`.
    pub fn fixed(season: Season) -> Self {
        Self::new(SeasonalTable::default(), SeasonSource::Fixed(season))
    }

    pub fn with_source(mut self, source: SeasonSource) -> Self {
        self.source = source;
        self
    }

    pub fn table(&self) -> &SeasonalTable {
        &self.table
    }

    pub fn current_season(&self) -> Season {
        match self.source {
            SeasonSource::Clock => Season::current(),
            SeasonSource::Fixed(season) => season,
        }
    }

    /// Multiplier of `category` in the current season.
    pub fn multiplier(&self, category: Category) -> f64 {
        self.table.multiplier(category, self.current_season())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_buckets_follow_zero_indexed_calendar() {
        let expected = [
            Season::Winter,
            Season::Winter,
            Season::Spring,
            Season::Spring,
            Season::Spring,
            Season::Summer,
            Season::Summer,
            Season::Summer,
            Season::Fall,
            Season::Fall,
            Season::Fall,
            Season::Winter,
        ];
        for (month0, season) in expected.into_iter().enumerate() {
            assert_eq!(Season::from_month0(month0 as u32), season, "month0={month0}");
        }
    }

    #[test]
    fn built_in_table_matches_known_values() {
        let table = SeasonalTable::default();
        assert_eq!(table.multiplier(Category::Toys, Season::Winter), 1.5);
        assert_eq!(table.multiplier(Category::Clothing, Season::Summer), 0.8);
        assert_eq!(table.multiplier(Category::Home, Season::Spring), 1.3);
        assert_eq!(table.multiplier(Category::Food, Season::Fall), 1.0);
    }

    #[test]
    fn missing_category_falls_back_to_default() {
        let table = SeasonalTable::empty().with_entry(
            Category::Toys,
            SeasonMultipliers::new(2.0, 2.0, 2.0, 2.0),
        );
        assert_eq!(table.multiplier(Category::Books, Season::Fall), DEFAULT_MULTIPLIER);
        assert_eq!(table.multiplier(Category::Toys, Season::Fall), 2.0);
    }

    #[test]
    fn fixed_calendar_ignores_clock() {
        let calendar = SeasonalCalendar::fixed(Season::Summer);
        assert_eq!(calendar.current_season(), Season::Summer);
        assert_eq!(calendar.multiplier(Category::Sports), 1.4);
    }

    #[test]
    fn season_parses_from_names() {
        assert_eq!("Fall".parse::<Season>().unwrap(), Season::Fall);
        assert_eq!("autumn".parse::<Season>().unwrap(), Season::Fall);
        assert!("monsoon".parse::<Season>().is_err());
    }
}
