use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Ticket status enum matching database enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "ticket_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Open => write!(f, "open"),
            TicketStatus::InProgress => write!(f, "in_progress"),
            TicketStatus::Completed => write!(f, "completed"),
            TicketStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Database model for service ticket
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ServiceTicket {
    pub id: i64,
    pub description: String,
    pub status: TicketStatus,
    pub service_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new service ticket
#[derive(Debug, Clone)]
pub struct CreateServiceTicket {
    pub description: String,
    pub status: TicketStatus,
    pub service_date: Option<NaiveDate>,
}
