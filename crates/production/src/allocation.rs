//! Attribution of global ingredient shortages to individual products.
//!
//! Shortages are computed per ingredient over the whole plan. When several
//! products draw on the same short ingredient, the policy decides how much of
//! the shortage each one reports:
//!
//! - `Proportional`: `shortage × product_demand / total_demand`.
//! - `ListOrder`: stock goes to products in selection order; each product
//!   reports whatever part of its own demand is left uncovered (possibly
//!   zero, but the ingredient is still listed).
//! - `AggregateOnly`: every consuming product reports the full shortage.
//!
//! A product that requires a short ingredient but has a requested quantity of
//! zero reports the full shortage under every policy: it has no demand to
//! scale by, and the stock it would need is already exhausted.
//!
//! For products with nonzero demand, `Proportional` and `ListOrder` amounts sum
//! to the global shortage.

use prodplan_core::Quantity;

use crate::config::AllocationPolicy;
use crate::reconciler::MissingIngredient;
use crate::selection::{ProductShortage, SelectedProduct};

/// Per-product shortages, index-aligned with `selected`.
///
/// Products that consume none of the missing ingredients get an empty list.
/// Every consumer of a missing ingredient gets an entry for it, even when its
/// attributed amount is zero (a product covered earlier under `ListOrder`).
pub fn allocate_shortages(
    policy: AllocationPolicy,
    selected: &[SelectedProduct],
    missing: &[MissingIngredient],
) -> Vec<Vec<ProductShortage>> {
    let mut out: Vec<Vec<ProductShortage>> = vec![Vec::new(); selected.len()];

    for entry in missing {
        let ingredient_id = entry.ingredient.id_typed();
        let shortage = entry.missing;

        let consumers: Vec<(usize, Quantity)> = selected
            .iter()
            .enumerate()
            .filter(|(_, s)| s.product.recipe().requires(ingredient_id))
            .map(|(i, s)| (i, s.demand_for(ingredient_id)))
            .collect();

        let total_demand: f64 = consumers.iter().map(|(_, d)| d.value()).sum();
        let mut remaining_stock = entry.ingredient.current_stock();

        for (idx, demand) in consumers {
            let amount = if demand.is_zero() {
                shortage
            } else {
                match policy {
                    AllocationPolicy::AggregateOnly => shortage,
                    AllocationPolicy::Proportional => {
                        proportional_share(shortage, demand, total_demand)
                    }
                    AllocationPolicy::ListOrder => {
                        let uncovered = demand.saturating_sub(remaining_stock);
                        remaining_stock = remaining_stock.saturating_sub(demand);
                        uncovered
                    }
                }
            };

            out[idx].push(ProductShortage {
                ingredient_id,
                missing_amount: amount,
            });
        }
    }

    out
}

fn proportional_share(shortage: Quantity, demand: Quantity, total_demand: f64) -> Quantity {
    if total_demand <= 0.0 {
        return shortage;
    }
    let share = shortage.value() * (demand.value() / total_demand);
    Quantity::new(share).unwrap_or(shortage)
}
