//! Product/recipe provider seam.

use prodplan_core::{DomainError, DomainResult, ProductId};

use crate::product::Product;

/// Supplies products with their recipes.
pub trait ProductCatalogProvider {
    fn products(&self) -> DomainResult<Vec<Product>>;

    /// Look up a single product. Defaults to a scan over `products()`.
    fn product(&self, id: ProductId) -> DomainResult<Product> {
        self.products()?
            .into_iter()
            .find(|p| p.id_typed() == id)
            .ok_or_else(DomainError::not_found)
    }
}

/// In-memory provider (tests, demos, offline snapshots).
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductProvider {
    products: Vec<Product>,
}

impl InMemoryProductProvider {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl ProductCatalogProvider for InMemoryProductProvider {
    fn products(&self) -> DomainResult<Vec<Product>> {
        Ok(self.products.clone())
    }
}
