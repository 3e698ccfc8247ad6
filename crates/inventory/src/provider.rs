//! Ingredient catalog provider seam.
//!
//! The backend owns ingredient data; callers fetch a snapshot through this trait
//! and build an [`IngredientCatalog`](crate::IngredientCatalog) from it.

use prodplan_core::DomainResult;

use crate::ingredient::Ingredient;

/// Supplies point-in-time ingredient snapshots.
pub trait IngredientCatalogProvider {
    fn ingredients(&self) -> DomainResult<Vec<Ingredient>>;
}

/// In-memory provider (tests, demos, offline snapshots).
#[derive(Debug, Clone, Default)]
pub struct InMemoryIngredientProvider {
    ingredients: Vec<Ingredient>,
}

impl InMemoryIngredientProvider {
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        Self { ingredients }
    }

    /// Replace an ingredient's record (e.g. after a stock movement upstream).
    pub fn upsert(&mut self, ingredient: Ingredient) {
        let id = ingredient.id_typed();
        match self.ingredients.iter_mut().find(|i| i.id_typed() == id) {
            Some(existing) => *existing = ingredient,
            None => self.ingredients.push(ingredient),
        }
    }
}

impl IngredientCatalogProvider for InMemoryIngredientProvider {
    fn ingredients(&self) -> DomainResult<Vec<Ingredient>> {
        Ok(self.ingredients.clone())
    }
}
