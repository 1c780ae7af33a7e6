use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::service_tickets::models::{
    AssignedMechanic, CreateServiceTicket, ServiceTicket, TicketStatus,
};

/// Request DTO for opening a service ticket
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceTicketDto {
    #[validate(
        length(min = 1, max = 300, message = "Description must be 1-300 characters"),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    pub description: String,

    /// Defaults to `open`
    #[serde(default)]
    pub status: Option<TicketStatus>,

    /// Day the vehicle is booked in, `YYYY-MM-DD`
    #[serde(default)]
    pub service_date: Option<NaiveDate>,
}

impl From<CreateServiceTicketDto> for CreateServiceTicket {
    fn from(dto: CreateServiceTicketDto) -> Self {
        Self {
            description: dto.description.trim().to_string(),
            status: dto.status.unwrap_or_default(),
            service_date: dto.service_date,
        }
    }
}

/// Mechanic as embedded in a ticket response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignedMechanicDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// When the mechanic was put on this ticket
    pub assigned_at: DateTime<Utc>,
}

impl From<AssignedMechanic> for AssignedMechanicDto {
    fn from(row: AssignedMechanic) -> Self {
        let m = row.mechanic;
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            assigned_at: row.assigned_at,
        }
    }
}

/// Response DTO for service ticket
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTicketResponseDto {
    pub id: i64,
    pub description: String,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_date: Option<NaiveDate>,
    /// Assigned mechanics, ascending by id
    pub mechanics: Vec<AssignedMechanicDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceTicketResponseDto {
    pub fn new(t: ServiceTicket, mechanics: Vec<AssignedMechanicDto>) -> Self {
        Self {
            id: t.id,
            description: t.description,
            status: t.status,
            service_date: t.service_date,
            mechanics,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_payload_defaults_to_open() {
        let dto: CreateServiceTicketDto =
            serde_json::from_str(r#"{"description":"oil change"}"#).unwrap();
        assert!(dto.validate().is_ok());

        let data = CreateServiceTicket::from(dto);
        assert_eq!(data.status, TicketStatus::Open);
        assert_eq!(data.service_date, None);
    }

    #[test]
    fn test_full_payload_parses() {
        let dto: CreateServiceTicketDto = serde_json::from_str(
            r#"{"description":"brakes","status":"in_progress","serviceDate":"2026-03-14"}"#,
        )
        .unwrap();

        assert_eq!(dto.status, Some(TicketStatus::InProgress));
        assert_eq!(dto.service_date, NaiveDate::from_ymd_opt(2026, 3, 14));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = serde_json::from_str::<CreateServiceTicketDto>(
            r#"{"description":"brakes","status":"someday"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_description_too_long_rejected() {
        let dto = CreateServiceTicketDto {
            description: "x".repeat(301),
            status: None,
            service_date: None,
        };
        assert!(dto.validate().is_err());
    }
}
