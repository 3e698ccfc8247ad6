//! Products domain module.
//!
//! Products and their recipes (bill of materials), implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;
pub mod provider;

pub use product::{Product, Recipe, RecipeItem};
pub use provider::{InMemoryProductProvider, ProductCatalogProvider};
