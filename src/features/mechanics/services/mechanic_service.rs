use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::mechanics::dtos::{
    CreateMechanicDto, MechanicResponseDto, UpdateMechanicDto,
};
use crate::features::mechanics::models::{Mechanic, UpdateMechanic};
use crate::modules::persistence::ShopStore;
use crate::shared::constants::EMPTY_UPDATE_MESSAGE;

/// Service for mechanic operations
pub struct MechanicService {
    store: Arc<dyn ShopStore>,
}

impl MechanicService {
    pub fn new(store: Arc<dyn ShopStore>) -> Self {
        Self { store }
    }

    /// Register a new mechanic
    pub async fn create(&self, dto: CreateMechanicDto) -> Result<MechanicResponseDto> {
        let mechanic = self.store.create_mechanic(dto.into()).await?;

        tracing::info!(
            "Mechanic created: id={}, email={}",
            mechanic.id,
            mechanic.email
        );

        Ok(MechanicResponseDto::new(mechanic, Vec::new()))
    }

    /// List all mechanics in registration order
    pub async fn list(&self) -> Result<Vec<MechanicResponseDto>> {
        let mechanics = self.store.list_mechanics().await?;
        self.with_ticket_ids(mechanics).await
    }

    pub async fn get(&self, id: i64) -> Result<MechanicResponseDto> {
        let mechanic = self
            .store
            .get_mechanic(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut dtos = self.with_ticket_ids(vec![mechanic]).await?;
        dtos.pop().ok_or_else(|| not_found(id))
    }

    /// Apply a partial update to a mechanic
    pub async fn update(&self, id: i64, dto: UpdateMechanicDto) -> Result<MechanicResponseDto> {
        let changes = UpdateMechanic::from(dto);
        if changes.is_empty() {
            return Err(AppError::Validation(EMPTY_UPDATE_MESSAGE.to_string()));
        }

        let mechanic = self
            .store
            .update_mechanic(id, changes)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Mechanic updated: id={}", mechanic.id);

        let mut dtos = self.with_ticket_ids(vec![mechanic]).await?;
        dtos.pop().ok_or_else(|| not_found(id))
    }

    /// Delete a mechanic; its ticket assignments are removed with it
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.store.delete_mechanic(id).await? {
            return Err(not_found(id));
        }

        tracing::info!("Mechanic deleted: id={}", id);
        Ok(())
    }

    async fn with_ticket_ids(&self, mechanics: Vec<Mechanic>) -> Result<Vec<MechanicResponseDto>> {
        let ids: Vec<i64> = mechanics.iter().map(|m| m.id).collect();

        let mut tickets_by_mechanic: HashMap<i64, Vec<i64>> = HashMap::new();
        for assignment in self.store.assignments_for_mechanics(&ids).await? {
            tickets_by_mechanic
                .entry(assignment.mechanic_id)
                .or_default()
                .push(assignment.ticket_id);
        }

        Ok(mechanics
            .into_iter()
            .map(|m| {
                let ticket_ids = tickets_by_mechanic.remove(&m.id).unwrap_or_default();
                MechanicResponseDto::new(m, ticket_ids)
            })
            .collect())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Mechanic {} not found", id))
}
