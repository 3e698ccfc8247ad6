//! Id → ingredient lookup table, built once per reconciliation pass.

use std::collections::HashMap;

use prodplan_core::IngredientId;

use crate::ingredient::Ingredient;

/// Immutable snapshot of the ingredient catalog, indexed by id.
///
/// Ingredients live in a `Vec` (snapshot order preserved) with a side index for
/// O(1) lookups. If the snapshot lists an id twice, the later entry replaces the
/// earlier one in place.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    ingredients: Vec<Ingredient>,
    index: HashMap<IngredientId, usize>,
}

impl IngredientCatalog {
    pub fn from_snapshot(snapshot: impl IntoIterator<Item = Ingredient>) -> Self {
        let mut ingredients: Vec<Ingredient> = Vec::new();
        let mut index: HashMap<IngredientId, usize> = HashMap::new();

        for ingredient in snapshot {
            let id = ingredient.id_typed();
            match index.get(&id) {
                Some(&slot) => {
                    tracing::warn!(ingredient_id = %id, "duplicate ingredient in catalog snapshot; keeping the last entry");
                    ingredients[slot] = ingredient;
                }
                None => {
                    index.insert(id, ingredients.len());
                    ingredients.push(ingredient);
                }
            }
        }

        Self { ingredients, index }
    }

    pub fn get(&self, id: IngredientId) -> Option<&Ingredient> {
        self.index.get(&id).map(|&slot| &self.ingredients[slot])
    }

    pub fn contains(&self, id: IngredientId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Ingredients in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter()
    }

    /// Ingredients currently under their reorder threshold.
    pub fn below_min_stock(&self) -> Vec<&Ingredient> {
        self.ingredients
            .iter()
            .filter(|i| i.is_below_min_stock())
            .collect()
    }
}

impl FromIterator<Ingredient> for IngredientCatalog {
    fn from_iter<T: IntoIterator<Item = Ingredient>>(iter: T) -> Self {
        Self::from_snapshot(iter)
    }
}
