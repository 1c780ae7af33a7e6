use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::mechanics::models::Mechanic;

/// Key pair of a `ticket_mechanic` row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Assignment {
    pub ticket_id: i64,
    pub mechanic_id: i64,
}

/// A mechanic joined through `ticket_mechanic`, tagged with the ticket it serves
#[derive(Debug, Clone, FromRow)]
pub struct AssignedMechanic {
    pub ticket_id: i64,
    pub assigned_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub mechanic: Mechanic,
}

/// Result of an assign or remove attempt, decided inside one store transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// The pair was inserted or deleted
    Applied,
    /// Assign: pair already present. Remove: pair was never present.
    Unchanged,
    TicketMissing,
    MechanicMissing,
}
