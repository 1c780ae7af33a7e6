use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::mechanics::models::{CreateMechanic, Mechanic, UpdateMechanic};
use crate::features::service_tickets::models::{
    AssignedMechanic, Assignment, AssignmentOutcome, CreateServiceTicket, ServiceTicket,
};

#[async_trait]
pub trait MechanicStore: Send + Sync {
    /// Fails with `AppError::Conflict` when the email is already registered
    async fn create_mechanic(&self, data: CreateMechanic) -> Result<Mechanic>;
    /// All mechanics in id order
    async fn list_mechanics(&self) -> Result<Vec<Mechanic>>;
    async fn get_mechanic(&self, id: i64) -> Result<Option<Mechanic>>;
    /// `Ok(None)` when no mechanic has this id
    async fn update_mechanic(&self, id: i64, changes: UpdateMechanic) -> Result<Option<Mechanic>>;
    /// Removes the mechanic together with its assignments. `Ok(false)` when absent.
    async fn delete_mechanic(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait ServiceTicketStore: Send + Sync {
    async fn create_ticket(&self, data: CreateServiceTicket) -> Result<ServiceTicket>;
    /// All tickets in id order
    async fn list_tickets(&self) -> Result<Vec<ServiceTicket>>;
    async fn get_ticket(&self, id: i64) -> Result<Option<ServiceTicket>>;
}

#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Links the pair if both sides exist. Existing pairs are left as they are.
    async fn assign_mechanic(&self, ticket_id: i64, mechanic_id: i64)
        -> Result<AssignmentOutcome>;
    async fn remove_mechanic(&self, ticket_id: i64, mechanic_id: i64)
        -> Result<AssignmentOutcome>;
    /// Mechanics assigned to any of `ticket_ids`, ordered by ticket then mechanic id
    async fn mechanics_for_tickets(&self, ticket_ids: &[i64]) -> Result<Vec<AssignedMechanic>>;
    /// Assignment rows for any of `mechanic_ids`, ordered by mechanic then ticket id
    async fn assignments_for_mechanics(&self, mechanic_ids: &[i64]) -> Result<Vec<Assignment>>;
}

/// Everything the shop services need from a backend
pub trait ShopStore: MechanicStore + ServiceTicketStore + AssignmentStore {}

impl<T: MechanicStore + ServiceTicketStore + AssignmentStore> ShopStore for T {}
