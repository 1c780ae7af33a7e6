use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::service_tickets::dtos::{CreateServiceTicketDto, ServiceTicketResponseDto};
use crate::features::service_tickets::services::{AssignmentService, ServiceTicketService};
use crate::shared::types::ApiResponse;

/// State for service ticket handlers
#[derive(Clone)]
pub struct ServiceTicketState {
    pub ticket_service: Arc<ServiceTicketService>,
    pub assignment_service: Arc<AssignmentService>,
}

/// Open a service ticket
#[utoipa::path(
    post,
    path = "/service-tickets/",
    request_body = CreateServiceTicketDto,
    responses(
        (status = 201, description = "Service ticket created", body = ApiResponse<ServiceTicketResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "service-tickets"
)]
pub async fn create_service_ticket(
    State(state): State<ServiceTicketState>,
    AppJson(dto): AppJson<CreateServiceTicketDto>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceTicketResponseDto>>)> {
    dto.validate()?;

    let ticket = state.ticket_service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(ticket),
            Some("Service ticket created successfully".to_string()),
            None,
        )),
    ))
}

/// List all service tickets with their assigned mechanics
#[utoipa::path(
    get,
    path = "/service-tickets/",
    responses(
        (status = 200, description = "List of service tickets", body = ApiResponse<Vec<ServiceTicketResponseDto>>),
    ),
    tag = "service-tickets"
)]
pub async fn list_service_tickets(
    State(state): State<ServiceTicketState>,
) -> Result<Json<ApiResponse<Vec<ServiceTicketResponseDto>>>> {
    let tickets = state.ticket_service.list().await?;
    Ok(Json(ApiResponse::list(tickets)))
}

/// Get service ticket by ID
#[utoipa::path(
    get,
    path = "/service-tickets/{ticket_id}",
    params(
        ("ticket_id" = i64, Path, description = "Service ticket ID")
    ),
    responses(
        (status = 200, description = "Service ticket found", body = ApiResponse<ServiceTicketResponseDto>),
        (status = 404, description = "Service ticket not found")
    ),
    tag = "service-tickets"
)]
pub async fn get_service_ticket(
    State(state): State<ServiceTicketState>,
    AppPath(ticket_id): AppPath<i64>,
) -> Result<Json<ApiResponse<ServiceTicketResponseDto>>> {
    let ticket = state.ticket_service.get(ticket_id).await?;
    Ok(Json(ApiResponse::success(Some(ticket), None, None)))
}

/// Assign a mechanic to a service ticket
///
/// Assigning an already assigned mechanic is accepted and changes nothing.
#[utoipa::path(
    put,
    path = "/service-tickets/{ticket_id}/assign-mechanic/{mechanic_id}",
    params(
        ("ticket_id" = i64, Path, description = "Service ticket ID"),
        ("mechanic_id" = i64, Path, description = "Mechanic ID")
    ),
    responses(
        (status = 200, description = "Mechanic assigned", body = ApiResponse<ServiceTicketResponseDto>),
        (status = 404, description = "Service ticket or mechanic not found")
    ),
    tag = "service-tickets"
)]
pub async fn assign_mechanic(
    State(state): State<ServiceTicketState>,
    AppPath((ticket_id, mechanic_id)): AppPath<(i64, i64)>,
) -> Result<Json<ApiResponse<ServiceTicketResponseDto>>> {
    let ticket = state
        .assignment_service
        .assign(ticket_id, mechanic_id)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(ticket),
        Some(format!(
            "Mechanic {} assigned to service ticket {}",
            mechanic_id, ticket_id
        )),
        None,
    )))
}

/// Remove a mechanic from a service ticket
#[utoipa::path(
    put,
    path = "/service-tickets/{ticket_id}/remove-mechanic/{mechanic_id}",
    params(
        ("ticket_id" = i64, Path, description = "Service ticket ID"),
        ("mechanic_id" = i64, Path, description = "Mechanic ID")
    ),
    responses(
        (status = 200, description = "Mechanic removed", body = ApiResponse<ServiceTicketResponseDto>),
        (status = 404, description = "Service ticket, mechanic or assignment not found")
    ),
    tag = "service-tickets"
)]
pub async fn remove_mechanic(
    State(state): State<ServiceTicketState>,
    AppPath((ticket_id, mechanic_id)): AppPath<(i64, i64)>,
) -> Result<Json<ApiResponse<ServiceTicketResponseDto>>> {
    let ticket = state
        .assignment_service
        .remove(ticket_id, mechanic_id)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(ticket),
        Some(format!(
            "Mechanic {} removed from service ticket {}",
            mechanic_id, ticket_id
        )),
        None,
    )))
}
