use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::service_tickets::dtos::ServiceTicketResponseDto;
use crate::features::service_tickets::models::AssignmentOutcome;
use crate::features::service_tickets::services::service_ticket_service::{
    self, ServiceTicketService,
};
use crate::modules::persistence::ShopStore;

/// Manages which mechanics work which tickets
pub struct AssignmentService {
    store: Arc<dyn ShopStore>,
    tickets: Arc<ServiceTicketService>,
}

impl AssignmentService {
    pub fn new(store: Arc<dyn ShopStore>, tickets: Arc<ServiceTicketService>) -> Self {
        Self { store, tickets }
    }

    /// Assign a mechanic to a ticket and return the ticket.
    ///
    /// Assigning a pair that is already linked changes nothing and succeeds.
    pub async fn assign(&self, ticket_id: i64, mechanic_id: i64) -> Result<ServiceTicketResponseDto> {
        match self.store.assign_mechanic(ticket_id, mechanic_id).await? {
            AssignmentOutcome::Applied => {
                tracing::info!(
                    "Mechanic assigned: ticket_id={}, mechanic_id={}",
                    ticket_id,
                    mechanic_id
                );
            }
            AssignmentOutcome::Unchanged => {
                tracing::debug!(
                    "Mechanic already assigned: ticket_id={}, mechanic_id={}",
                    ticket_id,
                    mechanic_id
                );
            }
            missing => return Err(missing_error(missing, ticket_id, mechanic_id)),
        }

        self.tickets.get(ticket_id).await
    }

    /// Remove a mechanic from a ticket and return the ticket
    pub async fn remove(&self, ticket_id: i64, mechanic_id: i64) -> Result<ServiceTicketResponseDto> {
        match self.store.remove_mechanic(ticket_id, mechanic_id).await? {
            AssignmentOutcome::Applied => {
                tracing::info!(
                    "Mechanic removed: ticket_id={}, mechanic_id={}",
                    ticket_id,
                    mechanic_id
                );
            }
            AssignmentOutcome::Unchanged => {
                return Err(AppError::NotFound(format!(
                    "Mechanic {} is not assigned to service ticket {}",
                    mechanic_id, ticket_id
                )));
            }
            missing => return Err(missing_error(missing, ticket_id, mechanic_id)),
        }

        self.tickets.get(ticket_id).await
    }
}

fn missing_error(outcome: AssignmentOutcome, ticket_id: i64, mechanic_id: i64) -> AppError {
    match outcome {
        AssignmentOutcome::TicketMissing => service_ticket_service::not_found(ticket_id),
        AssignmentOutcome::MechanicMissing => {
            AppError::NotFound(format!("Mechanic {} not found", mechanic_id))
        }
        AssignmentOutcome::Applied | AssignmentOutcome::Unchanged => AppError::Internal(format!(
            "Unexpected assignment outcome {:?} for ticket {} and mechanic {}",
            outcome, ticket_id, mechanic_id
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::mechanics::MechanicService;
    use crate::shared::test_helpers::{mechanic_dto, test_store, ticket_dto};

    struct Fixture {
        mechanics: MechanicService,
        tickets: Arc<ServiceTicketService>,
        assignments: AssignmentService,
    }

    fn fixture() -> Fixture {
        let store = test_store();
        let tickets = Arc::new(ServiceTicketService::new(Arc::clone(&store)));
        Fixture {
            mechanics: MechanicService::new(Arc::clone(&store)),
            assignments: AssignmentService::new(store, Arc::clone(&tickets)),
            tickets,
        }
    }

    #[tokio::test]
    async fn test_assign_lists_mechanic_once_even_when_repeated() {
        let f = fixture();
        let ticket = f.tickets.create(ticket_dto("oil change")).await.unwrap();
        let mechanic = f
            .mechanics
            .create(mechanic_dto("Sam", "sam@shop.test"))
            .await
            .unwrap();

        f.assignments.assign(ticket.id, mechanic.id).await.unwrap();
        let again = f.assignments.assign(ticket.id, mechanic.id).await.unwrap();

        assert_eq!(again.mechanics.len(), 1);
        assert_eq!(again.mechanics[0].id, mechanic.id);

        let mechanic = f.mechanics.get(mechanic.id).await.unwrap();
        assert_eq!(mechanic.service_ticket_ids, vec![ticket.id]);
    }

    #[tokio::test]
    async fn test_assign_missing_ticket_or_mechanic() {
        let f = fixture();

        let err = f.assignments.assign(1, 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m.contains("Service ticket 1")));

        f.tickets.create(ticket_dto("oil change")).await.unwrap();
        let err = f.assignments.assign(1, 5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m.contains("Mechanic 5")));
    }

    #[tokio::test]
    async fn test_remove_unassigned_pair_not_found() {
        let f = fixture();
        f.tickets.create(ticket_dto("oil change")).await.unwrap();
        f.mechanics
            .create(mechanic_dto("Sam", "sam@shop.test"))
            .await
            .unwrap();

        let err = f.assignments.remove(1, 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m.contains("not assigned")));
    }

    #[tokio::test]
    async fn test_assign_then_remove_leaves_ticket_empty() {
        let f = fixture();
        f.tickets.create(ticket_dto("oil change")).await.unwrap();
        f.mechanics
            .create(mechanic_dto("Sam", "sam@shop.test"))
            .await
            .unwrap();

        let assigned = f.assignments.assign(1, 1).await.unwrap();
        assert_eq!(assigned.mechanics.len(), 1);

        let removed = f.assignments.remove(1, 1).await.unwrap();
        assert!(removed.mechanics.is_empty());
    }

    #[tokio::test]
    async fn test_deleting_mechanic_drops_it_from_tickets() {
        let f = fixture();
        f.tickets.create(ticket_dto("oil change")).await.unwrap();
        f.mechanics
            .create(mechanic_dto("Sam", "sam@shop.test"))
            .await
            .unwrap();
        f.assignments.assign(1, 1).await.unwrap();

        f.mechanics.delete(1).await.unwrap();

        let ticket = f.tickets.get(1).await.unwrap();
        assert!(ticket.mechanics.is_empty());
    }
}
