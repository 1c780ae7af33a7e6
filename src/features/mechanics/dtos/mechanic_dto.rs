use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::mechanics::models::{CreateMechanic, Mechanic, UpdateMechanic};
use crate::shared::validation::{trim_optional_string, trim_string};

/// Request DTO for registering a mechanic
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMechanicDto {
    #[validate(
        length(min = 1, max = 150, message = "Name must be 1-150 characters"),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    #[serde(deserialize_with = "trim_string")]
    pub name: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 200, message = "Email must not exceed 200 characters")
    )]
    #[serde(deserialize_with = "trim_string")]
    pub email: String,

    #[validate(
        length(max = 20, message = "Phone must not exceed 20 characters"),
        regex(
            path = "*crate::shared::validation::PHONE_REGEX",
            message = "Phone may only contain digits, spaces, dashes, dots, parentheses and a leading +"
        )
    )]
    #[serde(
        default,
        deserialize_with = "trim_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
}

/// Request DTO for updating a mechanic; omitted fields keep their value and
/// an empty `phone` clears it
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMechanicDto {
    #[validate(
        length(min = 1, max = 150, message = "Name must be 1-150 characters"),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    #[serde(
        default,
        deserialize_with = "trim_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 200, message = "Email must not exceed 200 characters")
    )]
    #[serde(
        default,
        deserialize_with = "trim_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,

    #[validate(custom(function = "crate::shared::validation::validate_phone_or_empty"))]
    #[serde(
        default,
        deserialize_with = "trim_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
}

/// Response DTO for mechanic
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MechanicResponseDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Tickets this mechanic is currently assigned to, ascending
    pub service_ticket_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MechanicResponseDto {
    pub fn new(m: Mechanic, service_ticket_ids: Vec<i64>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            service_ticket_ids,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<CreateMechanicDto> for CreateMechanic {
    fn from(dto: CreateMechanicDto) -> Self {
        Self {
            name: dto.name,
            // Emails compare case-insensitively
            email: dto.email.to_lowercase(),
            phone: dto.phone,
        }
    }
}

impl From<UpdateMechanicDto> for UpdateMechanic {
    fn from(dto: UpdateMechanicDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email.map(|e| e.to_lowercase()),
            phone: dto.phone.map(|p| (!p.is_empty()).then_some(p)),
        }
    }
}
