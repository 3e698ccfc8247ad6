//! Ingredient reconciliation: aggregated demand vs. stock on hand.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use prodplan_core::{IngredientId, Quantity};
use prodplan_inventory::{Ingredient, IngredientCatalog};

use crate::allocation::allocate_shortages;
use crate::config::ReconcilerConfig;
use crate::selection::SelectedProduct;

/// Aggregated demand for one ingredient across all selected products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientUsage {
    pub ingredient: Ingredient,
    pub amount_used: Quantity,
}

/// An ingredient whose aggregated demand exceeds its current stock.
///
/// `missing_amount` always equals `missing`; both names are kept for consumers
/// that read either one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingIngredient {
    pub ingredient: Ingredient,
    pub missing: Quantity,
    pub missing_amount: Quantity,
}

/// Everything the planning view needs after a change to the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub usage: Vec<IngredientUsage>,
    pub missing: Vec<MissingIngredient>,
    pub products: Vec<SelectedProduct>,
    /// Share of used ingredients that are fully covered, 0..=100.
    pub availability_percentage: u8,
    pub can_produce_all: bool,
}

/// Stock-aware feasibility check over an ingredient snapshot.
///
/// Holds no mutable state; every operation is a pure function of its inputs and
/// the borrowed catalog, so one reconciler may be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct IngredientReconciler<'a> {
    catalog: &'a IngredientCatalog,
    config: &'a ReconcilerConfig,
}

impl<'a> IngredientReconciler<'a> {
    pub fn new(catalog: &'a IngredientCatalog, config: &'a ReconcilerConfig) -> Self {
        Self { catalog, config }
    }

    /// Total demand per ingredient, in order of first encounter.
    ///
    /// Products with zero quantity contribute nothing and ingredients with zero
    /// total demand are left out. Recipe items that reference an ingredient
    /// missing from the catalog are skipped.
    pub fn compute_usage(&self, selected: &[SelectedProduct]) -> Vec<IngredientUsage> {
        let mut totals: Vec<(&Ingredient, Quantity)> = Vec::new();
        let mut slots: HashMap<IngredientId, usize> = HashMap::new();

        for sp in selected.iter().filter(|sp| sp.quantity.is_positive()) {
            for item in sp.product.recipe().items() {
                let Some(ingredient) = self.catalog.get(item.ingredient_id) else {
                    if self.config.warn_on_unknown_ingredient {
                        tracing::warn!(
                            ingredient_id = %item.ingredient_id,
                            product_id = %sp.product_id(),
                            "recipe references unknown ingredient; skipping"
                        );
                    }
                    continue;
                };

                let needed = item.quantity.saturating_mul(sp.quantity);
                match slots.get(&item.ingredient_id) {
                    Some(&slot) => totals[slot].1 = totals[slot].1.saturating_add(needed),
                    None => {
                        slots.insert(item.ingredient_id, totals.len());
                        totals.push((ingredient, needed));
                    }
                }
            }
        }

        totals
            .into_iter()
            .filter(|(_, amount)| amount.is_positive())
            .map(|(ingredient, amount_used)| IngredientUsage {
                ingredient: ingredient.clone(),
                amount_used,
            })
            .collect()
    }

    /// Ingredients whose demand strictly exceeds current stock.
    pub fn compute_missing_ingredients(&self, usage: &[IngredientUsage]) -> Vec<MissingIngredient> {
        usage
            .iter()
            .filter_map(|u| {
                let missing = u.amount_used.saturating_sub(u.ingredient.current_stock());
                missing.is_positive().then(|| MissingIngredient {
                    ingredient: u.ingredient.clone(),
                    missing,
                    missing_amount: missing,
                })
            })
            .collect()
    }

    /// Fresh copies of `selected` with `can_produce` and `missing_ingredients` filled in.
    ///
    /// A product is blocked when any ingredient it needs (nonzero per-unit
    /// requirement) is short across the whole plan. Per-product amounts follow
    /// the configured [`AllocationPolicy`](crate::AllocationPolicy).
    pub fn annotate_producibility(
        &self,
        selected: &[SelectedProduct],
        missing: &[MissingIngredient],
    ) -> Vec<SelectedProduct> {
        let allocated = allocate_shortages(self.config.allocation_policy, selected, missing);

        selected
            .iter()
            .zip(allocated)
            .map(|(sp, shortages)| {
                let mut annotated = sp.unannotated();
                annotated.can_produce = !missing
                    .iter()
                    .any(|m| sp.product.recipe().requires(m.ingredient.id_typed()));
                annotated.missing_ingredients = shortages;
                annotated
            })
            .collect()
    }

    /// Run the full pass: usage, shortages, producibility and availability.
    pub fn reconcile(&self, selected: &[SelectedProduct]) -> ReconciliationReport {
        let usage = self.compute_usage(selected);
        let missing = self.compute_missing_ingredients(&usage);
        let products = self.annotate_producibility(selected, &missing);
        let availability = availability_percentage(usage.len(), missing.len());
        let can_produce_all = products.iter().all(|p| p.can_produce);

        tracing::debug!(
            selected = selected.len(),
            ingredients_used = usage.len(),
            ingredients_missing = missing.len(),
            availability,
            can_produce_all,
            policy = %self.config.allocation_policy,
            "reconciled production plan"
        );

        ReconciliationReport {
            usage,
            missing,
            products,
            availability_percentage: availability,
            can_produce_all,
        }
    }
}

/// Percentage of tracked ingredients that are not short, rounded.
///
/// No tracked ingredients counts as fully available.
pub fn availability_percentage(tracked: usize, missing_count: usize) -> u8 {
    if missing_count == 0 || tracked == 0 {
        return 100;
    }
    let available = tracked.saturating_sub(missing_count) as f64;
    ((available / tracked as f64) * 100.0).round() as u8
}
