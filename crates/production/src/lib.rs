//! Production planning module.
//!
//! Stock-aware planning of which selected products can be produced and what is
//! missing, plus the `Production` aggregate that consumes the resulting gate.
//!
//! Everything here is synchronous and side-effect free apart from logging; the
//! caller owns the ingredient snapshot and the selection and passes them in.

pub mod allocation;
pub mod config;
pub mod production;
pub mod reconciler;
pub mod selection;
pub mod session;

pub use allocation::allocate_shortages;
pub use config::{AllocationPolicy, ReconcilerConfig};
pub use production::{
    CompleteProduction, PlanProduction, PlannedItem, Production, ProductionCommand,
    ProductionCompleted, ProductionEvent, ProductionId, ProductionPlanned, ProductionStarted,
    ProductionStatus, StartProduction,
};
pub use reconciler::{
    IngredientReconciler, IngredientUsage, MissingIngredient, ReconciliationReport,
    availability_percentage,
};
pub use selection::{ProductShortage, SelectedProduct};
pub use session::PlanningSession;
