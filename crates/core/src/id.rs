//! Strongly-typed identifiers used across the domain.
//!
//! Catalog entities (ingredients, products) carry the numeric ids assigned by
//! the upstream backend. Aggregates owned by this workspace use UUIDv7.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an aggregate root.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(Uuid);

impl AggregateId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AggregateId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for AggregateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for AggregateId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for AggregateId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("AggregateId: {e}")))?;
        Ok(Self(uuid))
    }
}

/// Identifier of an ingredient in the backend catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(u64);

/// Identifier of a product in the backend catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

macro_rules! impl_numeric_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
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
                let raw = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_numeric_newtype!(IngredientId, "IngredientId");
impl_numeric_newtype!(ProductId, "ProductId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse_from_strings() {
        assert_eq!("42".parse::<IngredientId>().unwrap(), IngredientId::new(42));
        assert_eq!(" 7 ".parse::<ProductId>().unwrap(), ProductId::new(7));
    }

    #[test]
    fn numeric_id_parse_failure_names_the_type() {
        let err = "abc".parse::<IngredientId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("IngredientId")),
            other => panic!("Expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn numeric_ids_serialize_transparently() {
        let json = serde_json::to_string(&IngredientId::new(999)).unwrap();
        assert_eq!(json, "999");
        let back: ProductId = serde_json::from_str("12").unwrap();
        assert_eq!(back.get(), 12);
    }

    #[test]
    fn aggregate_id_round_trips_through_display() {
        let id = AggregateId::new();
        let parsed: AggregateId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
