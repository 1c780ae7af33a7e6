use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::service_tickets::dtos::{
    AssignedMechanicDto, CreateServiceTicketDto, ServiceTicketResponseDto,
};
use crate::features::service_tickets::models::ServiceTicket;
use crate::modules::persistence::ShopStore;

/// Service for service ticket operations
pub struct ServiceTicketService {
    store: Arc<dyn ShopStore>,
}

impl ServiceTicketService {
    pub fn new(store: Arc<dyn ShopStore>) -> Self {
        Self { store }
    }

    /// Open a new service ticket with no mechanics assigned
    pub async fn create(&self, dto: CreateServiceTicketDto) -> Result<ServiceTicketResponseDto> {
        let ticket = self.store.create_ticket(dto.into()).await?;

        tracing::info!(
            "Service ticket created: id={}, status={}",
            ticket.id,
            ticket.status
        );

        Ok(ServiceTicketResponseDto::new(ticket, Vec::new()))
    }

    /// List all tickets with their assigned mechanics
    pub async fn list(&self) -> Result<Vec<ServiceTicketResponseDto>> {
        let tickets = self.store.list_tickets().await?;
        self.with_mechanics(tickets).await
    }

    pub async fn get(&self, id: i64) -> Result<ServiceTicketResponseDto> {
        let ticket = self
            .store
            .get_ticket(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut dtos = self.with_mechanics(vec![ticket]).await?;
        dtos.pop().ok_or_else(|| not_found(id))
    }

    async fn with_mechanics(
        &self,
        tickets: Vec<ServiceTicket>,
    ) -> Result<Vec<ServiceTicketResponseDto>> {
        let ids: Vec<i64> = tickets.iter().map(|t| t.id).collect();

        let mut mechanics_by_ticket: HashMap<i64, Vec<AssignedMechanicDto>> = HashMap::new();
        for row in self.store.mechanics_for_tickets(&ids).await? {
            mechanics_by_ticket
                .entry(row.ticket_id)
                .or_default()
                .push(row.into());
        }

        Ok(tickets
            .into_iter()
            .map(|t| {
                let mechanics = mechanics_by_ticket.remove(&t.id).unwrap_or_default();
                ServiceTicketResponseDto::new(t, mechanics)
            })
            .collect())
    }
}

pub(crate) fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Service ticket {} not found", id))
}
