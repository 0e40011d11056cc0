//! Strongly-typed identifiers used across the domain.
//!
//! Item ids come from the store's monotonically increasing counter; bill ids
//! are time-based. The two id spaces are independent, so they get distinct
//! types that cannot be mixed up at call sites.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Largest id accepted from imports or storage (2^53 - 1).
///
/// Ids are exchanged as JSON numbers; anything above this loses precision in
/// most JSON consumers and leaves no room for the next id.
pub const MAX_ID: u64 = (1 << 53) - 1;

/// Identifier of an inventory item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

/// Identifier of a scanned bill.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(u64);

macro_rules! impl_u64_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_u64_newtype!(ItemId, "ItemId");
impl_u64_newtype!(BillId, "BillId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_round_trip() {
        let id: ItemId = " 42 ".parse().unwrap();
        assert_eq!(id, ItemId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = "abc".parse::<BillId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("BillId")),
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn max_id_is_the_largest_exact_json_integer() {
        assert_eq!(MAX_ID, 9_007_199_254_740_991);
        assert_eq!(MAX_ID as f64 as u64, MAX_ID);
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&ItemId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}
