use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use prodplan_core::{Aggregate, AggregateId, AggregateRoot, DomainError, ProductId, Quantity};
use prodplan_events::Event;

/// Production run identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductionId(pub AggregateId);

impl ProductionId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Production status lifecycle: `pending → in_progress → completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionStatus {
    Pending,
    InProgress,
    Completed,
}

/// One line of a committed plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedItem {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// Aggregate root: Production.
#[derive(Debug, Clone, PartialEq)]
pub struct Production {
    id: ProductionId,
    status: ProductionStatus,
    items: Vec<PlannedItem>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    version: u64,
    created: bool,
}

impl Production {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: ProductionId) -> Self {
        Self {
            id,
            status: ProductionStatus::Pending,
            items: Vec::new(),
            started_at: None,
            completed_at: None,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ProductionId {
        self.id
    }

    pub fn status(&self) -> ProductionStatus {
        self.status
    }

    pub fn items(&self) -> &[PlannedItem] {
        &self.items
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

impl AggregateRoot for Production {
    type Id = ProductionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: PlanProduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProduction {
    pub production_id: ProductionId,
    pub items: Vec<PlannedItem>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: StartProduction.
///
/// `can_produce` is the reconciler's verdict for the whole plan at the moment
/// the user pressed start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartProduction {
    pub production_id: ProductionId,
    pub can_produce: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CompleteProduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteProduction {
    pub production_id: ProductionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductionCommand {
    PlanProduction(PlanProduction),
    StartProduction(StartProduction),
    CompleteProduction(CompleteProduction),
}

/// Event: ProductionPlanned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPlanned {
    pub production_id: ProductionId,
    pub items: Vec<PlannedItem>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductionStarted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionStarted {
    pub production_id: ProductionId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductionCompleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompleted {
    pub production_id: ProductionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProductionEvent {
    ProductionPlanned(ProductionPlanned),
    ProductionStarted(ProductionStarted),
    ProductionCompleted(ProductionCompleted),
}

impl Event for ProductionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductionEvent::ProductionPlanned(_) => "production.production.planned",
            ProductionEvent::ProductionStarted(_) => "production.production.started",
            ProductionEvent::ProductionCompleted(_) => "production.production.completed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductionEvent::ProductionPlanned(e) => e.occurred_at,
            ProductionEvent::ProductionStarted(e) => e.occurred_at,
            ProductionEvent::ProductionCompleted(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Production {
    type Command = ProductionCommand;
    type Event = ProductionEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductionEvent::ProductionPlanned(e) => {
                self.id = e.production_id;
                self.items = e.items.clone();
                self.status = ProductionStatus::Pending;
                self.created = true;
            }
            ProductionEvent::ProductionStarted(e) => {
                self.status = ProductionStatus::InProgress;
                self.started_at = Some(e.occurred_at);
            }
            ProductionEvent::ProductionCompleted(e) => {
                self.status = ProductionStatus::Completed;
                self.completed_at = Some(e.occurred_at);
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductionCommand::PlanProduction(cmd) => self.handle_plan(cmd),
            ProductionCommand::StartProduction(cmd) => self.handle_start(cmd),
            ProductionCommand::CompleteProduction(cmd) => self.handle_complete(cmd),
        }
    }
}

impl Production {
    fn ensure_production_id(&self, production_id: ProductionId) -> Result<(), DomainError> {
        if self.id != production_id {
            return Err(DomainError::invariant("production_id mismatch"));
        }
        Ok(())
    }

    fn handle_plan(&self, cmd: &PlanProduction) -> Result<Vec<ProductionEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("production already exists"));
        }
        if cmd.items.is_empty() {
            return Err(DomainError::validation("production plan cannot be empty"));
        }
        if cmd.items.iter().all(|item| item.quantity.is_zero()) {
            return Err(DomainError::validation(
                "production plan must request at least one unit",
            ));
        }

        Ok(vec![ProductionEvent::ProductionPlanned(ProductionPlanned {
            production_id: cmd.production_id,
            items: cmd.items.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_start(&self, cmd: &StartProduction) -> Result<Vec<ProductionEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_production_id(cmd.production_id)?;

        if self.status != ProductionStatus::Pending {
            return Err(DomainError::invariant(format!(
                "only pending productions can be started (status: {:?})",
                self.status
            )));
        }
        if !cmd.can_produce {
            return Err(DomainError::invariant(
                "insufficient ingredient stock to start production",
            ));
        }

        Ok(vec![ProductionEvent::ProductionStarted(ProductionStarted {
            production_id: cmd.production_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_complete(
        &self,
        cmd: &CompleteProduction,
    ) -> Result<Vec<ProductionEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_production_id(cmd.production_id)?;

        if self.status != ProductionStatus::InProgress {
            return Err(DomainError::invariant(format!(
                "only in-progress productions can be completed (status: {:?})",
                self.status
            )));
        }

        Ok(vec![ProductionEvent::ProductionCompleted(ProductionCompleted {
            production_id: cmd.production_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_production_id() -> ProductionId {
        ProductionId::new(AggregateId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn items() -> Vec<PlannedItem> {
        vec![PlannedItem {
            product_id: ProductId::new(1),
            quantity: Quantity::new(3.0).unwrap(),
        }]
    }

    fn planned(production_id: ProductionId) -> Production {
        let mut production = Production::empty(production_id);
        let events = production
            .handle(&ProductionCommand::PlanProduction(PlanProduction {
                production_id,
                items: items(),
                occurred_at: test_time(),
            }))
            .unwrap();
        for e in &events {
            production.apply(e);
        }
        production
    }

    fn start(production: &Production, can_produce: bool) -> Result<Vec<ProductionEvent>, DomainError> {
        production.handle(&ProductionCommand::StartProduction(StartProduction {
            production_id: production.id_typed(),
            can_produce,
            occurred_at: test_time(),
        }))
    }

    fn complete(production: &Production) -> Result<Vec<ProductionEvent>, DomainError> {
        production.handle(&ProductionCommand::CompleteProduction(CompleteProduction {
            production_id: production.id_typed(),
            occurred_at: test_time(),
        }))
    }

    #[test]
    fn plan_production_emits_planned_event() {
        let production_id = test_production_id();
        let production = planned(production_id);

        assert_eq!(production.status(), ProductionStatus::Pending);
        assert_eq!(production.items(), items().as_slice());
        assert_eq!(production.version(), 1);
    }

    #[test]
    fn plan_production_rejects_empty_plan() {
        let production_id = test_production_id();
        let err = Production::empty(production_id)
            .handle(&ProductionCommand::PlanProduction(PlanProduction {
                production_id,
                items: vec![],
                occurred_at: test_time(),
            }))
            .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty plan"),
        }
    }

    #[test]
    fn plan_production_rejects_all_zero_quantities() {
        let production_id = test_production_id();
        let err = Production::empty(production_id)
            .handle(&ProductionCommand::PlanProduction(PlanProduction {
                production_id,
                items: vec![PlannedItem {
                    product_id: ProductId::new(1),
                    quantity: Quantity::ZERO,
                }],
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn plan_production_rejects_duplicate_creation() {
        let production_id = test_production_id();
        let production = planned(production_id);
        let err = production
            .handle(&ProductionCommand::PlanProduction(PlanProduction {
                production_id,
                items: items(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn start_requires_can_produce() {
        let production = planned(test_production_id());
        let err = start(&production, false).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn full_lifecycle() {
        let mut production = planned(test_production_id());

        for e in &start(&production, true).unwrap() {
            production.apply(e);
        }
        assert_eq!(production.status(), ProductionStatus::InProgress);
        assert!(production.started_at().is_some());

        for e in &complete(&production).unwrap() {
            production.apply(e);
        }
        assert_eq!(production.status(), ProductionStatus::Completed);
        assert!(production.completed_at().is_some());
        assert_eq!(production.version(), 3);
    }

    #[test]
    fn cannot_complete_pending_production() {
        let production = planned(test_production_id());
        let err = complete(&production).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn cannot_start_twice() {
        let mut production = planned(test_production_id());
        for e in &start(&production, true).unwrap() {
            production.apply(e);
        }
        assert!(matches!(
            start(&production, true).unwrap_err(),
            DomainError::InvariantViolation(_)
        ));
    }

    #[test]
    fn commands_on_unknown_production_are_not_found() {
        let production = Production::empty(test_production_id());
        assert_eq!(start(&production, true).unwrap_err(), DomainError::NotFound);
        assert_eq!(complete(&production).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn start_rejects_wrong_production_id() {
        let production = planned(test_production_id());
        let err = production
            .handle(&ProductionCommand::StartProduction(StartProduction {
                production_id: test_production_id(),
                can_produce: true,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let production = planned(test_production_id());
        let before = production.clone();
        let _ = start(&production, true);
        let _ = complete(&production);
        assert_eq!(production, before);
    }

    #[test]
    fn event_types_are_stable() {
        let production_id = test_production_id();
        let at = test_time();
        let started = ProductionEvent::ProductionStarted(ProductionStarted {
            production_id,
            occurred_at: at,
        });
        assert_eq!(started.event_type(), "production.production.started");
        assert_eq!(Event::version(&started), 1);
        assert_eq!(started.occurred_at(), at);
    }
}
