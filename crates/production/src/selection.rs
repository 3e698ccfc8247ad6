use serde::{Deserialize, Serialize};

use prodplan_core::{IngredientId, ProductId, Quantity};
use prodplan_products::Product;

/// Share of a global ingredient shortage attributed to one product.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductShortage {
    pub ingredient_id: IngredientId,
    pub missing_amount: Quantity,
}

/// A product chosen for the current plan, with its requested quantity.
///
/// `can_produce` and `missing_ingredients` are reconciler outputs. A freshly
/// selected product reads as producible until it has been annotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: Quantity,
    #[serde(default = "default_can_produce")]
    pub can_produce: bool,
    #[serde(default)]
    pub missing_ingredients: Vec<ProductShortage>,
}

fn default_can_produce() -> bool {
    true
}

impl SelectedProduct {
    pub fn new(product: Product, quantity: Quantity) -> Self {
        Self {
            product,
            quantity,
            can_produce: true,
            missing_ingredients: Vec::new(),
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id_typed()
    }

    /// Total demand for `ingredient_id` at the requested quantity.
    pub fn demand_for(&self, ingredient_id: IngredientId) -> Quantity {
        self.product
            .recipe()
            .requirement(ingredient_id)
            .saturating_mul(self.quantity)
    }

    /// Copy with the computed fields reset.
    pub(crate) fn unannotated(&self) -> Self {
        Self::new(self.product.clone(), self.quantity)
    }
}
