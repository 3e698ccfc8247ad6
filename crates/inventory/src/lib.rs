//! Inventory domain module.
//!
//! Ingredients with their current stock, and the per-pass lookup table the
//! production reconciler reads from. Pure domain logic (no IO, no HTTP, no storage).

pub mod catalog;
pub mod ingredient;
pub mod provider;

pub use catalog::IngredientCatalog;
pub use ingredient::Ingredient;
pub use provider::{IngredientCatalogProvider, InMemoryIngredientProvider};
