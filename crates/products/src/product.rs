use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use prodplan_core::{DomainError, DomainResult, Entity, IngredientId, ProductId, Quantity, ValueObject};

/// Amount of one ingredient required to produce one unit of a product.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItem {
    pub ingredient_id: IngredientId,
    pub quantity: Quantity,
}

impl ValueObject for RecipeItem {}

impl RecipeItem {
    pub fn new(ingredient_id: IngredientId, quantity: Quantity) -> Self {
        Self {
            ingredient_id,
            quantity,
        }
    }
}

/// A product's bill of materials.
///
/// Each ingredient appears at most once. Item order carries no meaning but is
/// preserved so that derived results are deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<RecipeItem>", into = "Vec<RecipeItem>")]
pub struct Recipe(Vec<RecipeItem>);

impl ValueObject for Recipe {}

impl Recipe {
    pub fn new(items: Vec<RecipeItem>) -> DomainResult<Self> {
        let mut seen: HashSet<IngredientId> = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.ingredient_id) {
                return Err(DomainError::validation(format!(
                    "ingredient {} appears more than once in recipe",
                    item.ingredient_id
                )));
            }
        }
        Ok(Self(items))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn items(&self) -> &[RecipeItem] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Per-unit requirement for `ingredient_id` (zero if not in the recipe).
    pub fn requirement(&self, ingredient_id: IngredientId) -> Quantity {
        self.0
            .iter()
            .find(|item| item.ingredient_id == ingredient_id)
            .map(|item| item.quantity)
            .unwrap_or(Quantity::ZERO)
    }

    /// Whether one unit of product needs a nonzero amount of `ingredient_id`.
    pub fn requires(&self, ingredient_id: IngredientId) -> bool {
        self.requirement(ingredient_id).is_positive()
    }
}

impl TryFrom<Vec<RecipeItem>> for Recipe {
    type Error = DomainError;

    fn try_from(items: Vec<RecipeItem>) -> Result<Self, Self::Error> {
        Recipe::new(items)
    }
}

impl From<Recipe> for Vec<RecipeItem> {
    fn from(recipe: Recipe) -> Self {
        recipe.0
    }
}

/// Entity: Product (something the business can produce from ingredients).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default)]
    recipe: Recipe,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, recipe: Recipe) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            sku: None,
            category: None,
            recipe,
        })
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
