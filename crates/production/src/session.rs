//! Planning session: the selection as an immutable value.
//!
//! The UI keeps one `PlanningSession` as its source of truth. Every edit
//! returns a new session, and the view re-derives usage and shortages from it
//! through [`PlanningSession::reconcile`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use prodplan_core::{DomainError, DomainResult, ProductId, Quantity};
use prodplan_inventory::IngredientCatalog;
use prodplan_products::Product;

use crate::config::ReconcilerConfig;
use crate::production::{PlanProduction, PlannedItem, ProductionId, StartProduction};
use crate::reconciler::{IngredientReconciler, ReconciliationReport};
use crate::selection::SelectedProduct;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanningSession {
    selected: Vec<SelectedProduct>,
}

impl PlanningSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[SelectedProduct] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.position(product_id).is_some()
    }

    /// Add `product` at `quantity`. Re-adding a selected product updates its
    /// quantity in place.
    pub fn with_product(&self, product: Product, quantity: Quantity) -> Self {
        let mut selected = self.selected.clone();
        match self.position(product.id_typed()) {
            Some(idx) => selected[idx] = SelectedProduct::new(product, quantity),
            None => selected.push(SelectedProduct::new(product, quantity)),
        }
        Self { selected }
    }

    /// Drop `product_id` from the plan. Removing an unselected product is a no-op.
    pub fn without_product(&self, product_id: ProductId) -> Self {
        Self {
            selected: self
                .selected
                .iter()
                .filter(|sp| sp.product_id() != product_id)
                .cloned()
                .collect(),
        }
    }

    pub fn with_quantity(&self, product_id: ProductId, quantity: Quantity) -> DomainResult<Self> {
        let idx = self.position(product_id).ok_or_else(DomainError::not_found)?;
        let mut selected = self.selected.clone();
        selected[idx] = SelectedProduct::new(selected[idx].product.clone(), quantity);
        Ok(Self { selected })
    }

    pub fn clear(&self) -> Self {
        Self::new()
    }

    pub fn reconcile(
        &self,
        catalog: &IngredientCatalog,
        config: &ReconcilerConfig,
    ) -> ReconciliationReport {
        IngredientReconciler::new(catalog, config).reconcile(&self.selected)
    }

    /// Whether the plan may be committed: something to make, nothing short.
    pub fn can_start(&self, report: &ReconciliationReport) -> bool {
        self.selected.iter().any(|sp| sp.quantity.is_positive()) && report.can_produce_all
    }

    /// Commands for the production commit action.
    ///
    /// Zero-quantity lines are dropped from the plan.
    pub fn to_commands(
        &self,
        report: &ReconciliationReport,
        production_id: ProductionId,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<(PlanProduction, StartProduction)> {
        let items: Vec<PlannedItem> = self
            .selected
            .iter()
            .filter(|sp| sp.quantity.is_positive())
            .map(|sp| PlannedItem {
                product_id: sp.product_id(),
                quantity: sp.quantity,
            })
            .collect();

        if items.is_empty() {
            return Err(DomainError::validation("production plan cannot be empty"));
        }

        Ok((
            PlanProduction {
                production_id,
                items,
                occurred_at,
            },
            StartProduction {
                production_id,
                can_produce: self.can_start(report),
                occurred_at,
            },
        ))
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.selected.iter().position(|sp| sp.product_id() == product_id)
    }
}
