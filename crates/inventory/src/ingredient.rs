use serde::{Deserialize, Serialize};

use prodplan_core::{DomainError, DomainResult, Entity, IngredientId, Quantity};

/// Entity: Ingredient (raw material held in stock).
///
/// Stock is owned by the backend and changes between reconciliation runs;
/// an `Ingredient` value is a point-in-time snapshot of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    id: IngredientId,
    name: String,
    current_stock: Quantity,
    unit: String,
    #[serde(default)]
    min_stock: Quantity,
}

impl Ingredient {
    pub fn new(
        id: IngredientId,
        name: impl Into<String>,
        current_stock: Quantity,
        unit: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("ingredient name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            current_stock,
            unit: unit.into(),
            min_stock: Quantity::ZERO,
        })
    }

    /// Set the reorder threshold.
    pub fn with_min_stock(mut self, min_stock: Quantity) -> Self {
        self.min_stock = min_stock;
        self
    }

    pub fn id_typed(&self) -> IngredientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_stock(&self) -> Quantity {
        self.current_stock
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn min_stock(&self) -> Quantity {
        self.min_stock
    }

    /// Informational: stock has dropped under the reorder threshold.
    ///
    /// Not used by shortage calculation.
    pub fn is_below_min_stock(&self) -> bool {
        self.current_stock < self.min_stock
    }
}

impl Entity for Ingredient {
    type Id = IngredientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
