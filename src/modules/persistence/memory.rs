use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::mechanics::models::{CreateMechanic, Mechanic, UpdateMechanic};
use crate::features::service_tickets::models::{
    AssignedMechanic, Assignment, AssignmentOutcome, CreateServiceTicket, ServiceTicket,
};
use crate::modules::persistence::traits::{AssignmentStore, MechanicStore, ServiceTicketStore};

/// Process-local backend. Each mutation runs under one write lock, which gives it
/// the same all-or-nothing behaviour as a database transaction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    mechanics: BTreeMap<i64, Mechanic>,
    tickets: BTreeMap<i64, ServiceTicket>,
    /// Keyed by (ticket_id, mechanic_id)
    assignments: BTreeMap<(i64, i64), DateTime<Utc>>,
    last_mechanic_id: i64,
    last_ticket_id: i64,
}

impl State {
    fn email_taken(&self, email: &str, except_id: Option<i64>) -> bool {
        self.mechanics
            .values()
            .any(|m| m.email == email && Some(m.id) != except_id)
    }

    fn check_pair(&self, ticket_id: i64, mechanic_id: i64) -> Option<AssignmentOutcome> {
        if !self.tickets.contains_key(&ticket_id) {
            return Some(AssignmentOutcome::TicketMissing);
        }
        if !self.mechanics.contains_key(&mechanic_id) {
            return Some(AssignmentOutcome::MechanicMissing);
        }
        None
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_conflict(email: &str) -> AppError {
    AppError::Conflict(format!("Email '{}' is already registered", email))
}

#[async_trait]
impl MechanicStore for MemoryStore {
    async fn create_mechanic(&self, data: CreateMechanic) -> Result<Mechanic> {
        let mut state = self.state.write();
        if state.email_taken(&data.email, None) {
            return Err(email_conflict(&data.email));
        }

        state.last_mechanic_id += 1;
        let now = Utc::now();
        let mechanic = Mechanic {
            id: state.last_mechanic_id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            created_at: now,
            updated_at: now,
        };
        state.mechanics.insert(mechanic.id, mechanic.clone());
        Ok(mechanic)
    }

    async fn list_mechanics(&self) -> Result<Vec<Mechanic>> {
        Ok(self.state.read().mechanics.values().cloned().collect())
    }

    async fn get_mechanic(&self, id: i64) -> Result<Option<Mechanic>> {
        Ok(self.state.read().mechanics.get(&id).cloned())
    }

    async fn update_mechanic(&self, id: i64, changes: UpdateMechanic) -> Result<Option<Mechanic>> {
        let mut state = self.state.write();
        if !state.mechanics.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = changes.email.as_deref() {
            if state.email_taken(email, Some(id)) {
                return Err(email_conflict(email));
            }
        }

        let Some(mechanic) = state.mechanics.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(mechanic);
        mechanic.updated_at = Utc::now();
        Ok(Some(mechanic.clone()))
    }

    async fn delete_mechanic(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write();
        if state.mechanics.remove(&id).is_none() {
            return Ok(false);
        }
        state
            .assignments
            .retain(|&(_, mechanic_id), _| mechanic_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ServiceTicketStore for MemoryStore {
    async fn create_ticket(&self, data: CreateServiceTicket) -> Result<ServiceTicket> {
        let mut state = self.state.write();
        state.last_ticket_id += 1;
        let now = Utc::now();
        let ticket = ServiceTicket {
            id: state.last_ticket_id,
            description: data.description,
            status: data.status,
            service_date: data.service_date,
            created_at: now,
            updated_at: now,
        };
        state.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn list_tickets(&self) -> Result<Vec<ServiceTicket>> {
        Ok(self.state.read().tickets.values().cloned().collect())
    }

    async fn get_ticket(&self, id: i64) -> Result<Option<ServiceTicket>> {
        Ok(self.state.read().tickets.get(&id).cloned())
    }
}

#[async_trait]
impl AssignmentStore for MemoryStore {
    async fn assign_mechanic(
        &self,
        ticket_id: i64,
        mechanic_id: i64,
    ) -> Result<AssignmentOutcome> {
        let mut state = self.state.write();
        if let Some(missing) = state.check_pair(ticket_id, mechanic_id) {
            return Ok(missing);
        }

        if state.assignments.contains_key(&(ticket_id, mechanic_id)) {
            return Ok(AssignmentOutcome::Unchanged);
        }
        state
            .assignments
            .insert((ticket_id, mechanic_id), Utc::now());
        Ok(AssignmentOutcome::Applied)
    }

    async fn remove_mechanic(
        &self,
        ticket_id: i64,
        mechanic_id: i64,
    ) -> Result<AssignmentOutcome> {
        let mut state = self.state.write();
        if let Some(missing) = state.check_pair(ticket_id, mechanic_id) {
            return Ok(missing);
        }

        Ok(match state.assignments.remove(&(ticket_id, mechanic_id)) {
            Some(_) => AssignmentOutcome::Applied,
            None => AssignmentOutcome::Unchanged,
        })
    }

    async fn mechanics_for_tickets(&self, ticket_ids: &[i64]) -> Result<Vec<AssignedMechanic>> {
        let wanted: BTreeSet<i64> = ticket_ids.iter().copied().collect();
        let state = self.state.read();

        // BTreeMap keys iterate in (ticket_id, mechanic_id) order
        Ok(state
            .assignments
            .iter()
            .filter(|((ticket_id, _), _)| wanted.contains(ticket_id))
            .filter_map(|(&(ticket_id, mechanic_id), &assigned_at)| {
                state
                    .mechanics
                    .get(&mechanic_id)
                    .map(|mechanic| AssignedMechanic {
                        ticket_id,
                        assigned_at,
                        mechanic: mechanic.clone(),
                    })
            })
            .collect())
    }

    async fn assignments_for_mechanics(&self, mechanic_ids: &[i64]) -> Result<Vec<Assignment>> {
        let wanted: BTreeSet<i64> = mechanic_ids.iter().copied().collect();
        let state = self.state.read();

        let mut rows: Vec<Assignment> = state
            .assignments
            .keys()
            .filter(|(_, mechanic_id)| wanted.contains(mechanic_id))
            .map(|&(ticket_id, mechanic_id)| Assignment {
                ticket_id,
                mechanic_id,
            })
            .collect();
        rows.sort_by_key(|a| (a.mechanic_id, a.ticket_id));
        Ok(rows)
    }
}
