//! Closed set of product categories.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Product category.
///
/// Serialized with the display name (`"Electronics"`, `"Toys"`, ...), which is
/// also the persisted form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Food,
    Home,
    Sports,
    Beauty,
    Books,
    Toys,
}

impl Category {
    /// All categories in canonical display order.
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Clothing,
        Category::Food,
        Category::Home,
        Category::Sports,
        Category::Beauty,
        Category::Books,
        Category::Toys,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Food => "Food",
            Category::Home => "Home",
            Category::Sports => "Sports",
            Category::Beauty => "Beauty",
            Category::Books => "Books",
            Category::Toys => "Toys",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    /// Case-insensitive match on the display name; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::validation(format!("unknown category: {needle:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("electronics".parse::<Category>().unwrap(), Category::Electronics);
        assert_eq!(" Toys ".parse::<Category>().unwrap(), Category::Toys);
    }

    #[test]
    fn unknown_category_is_a_validation_error() {
        let err = "Garden".parse::<Category>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn serde_uses_display_name() {
        let json = serde_json::to_string(&Category::Beauty).unwrap();
        assert_eq!(json, "\"Beauty\"");
        let back: Category = serde_json::from_str("\"Books\"").unwrap();
        assert_eq!(back, Category::Books);
    }
}
