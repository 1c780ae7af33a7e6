use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::mechanics::dtos::{
    CreateMechanicDto, MechanicResponseDto, UpdateMechanicDto,
};
use crate::features::mechanics::services::MechanicService;
use crate::shared::types::ApiResponse;

/// Register a mechanic
#[utoipa::path(
    post,
    path = "/mechanics/",
    request_body = CreateMechanicDto,
    responses(
        (status = 201, description = "Mechanic created", body = ApiResponse<MechanicResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "mechanics"
)]
pub async fn create_mechanic(
    State(service): State<Arc<MechanicService>>,
    AppJson(dto): AppJson<CreateMechanicDto>,
) -> Result<(StatusCode, Json<ApiResponse<MechanicResponseDto>>)> {
    dto.validate()?;

    let mechanic = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(mechanic),
            Some("Mechanic created successfully".to_string()),
            None,
        )),
    ))
}

/// List all mechanics
#[utoipa::path(
    get,
    path = "/mechanics/",
    responses(
        (status = 200, description = "List of mechanics", body = ApiResponse<Vec<MechanicResponseDto>>),
    ),
    tag = "mechanics"
)]
pub async fn list_mechanics(
    State(service): State<Arc<MechanicService>>,
) -> Result<Json<ApiResponse<Vec<MechanicResponseDto>>>> {
    let mechanics = service.list().await?;
    Ok(Json(ApiResponse::list(mechanics)))
}

/// Get mechanic by ID
#[utoipa::path(
    get,
    path = "/mechanics/{id}",
    params(
        ("id" = i64, Path, description = "Mechanic ID")
    ),
    responses(
        (status = 200, description = "Mechanic found", body = ApiResponse<MechanicResponseDto>),
        (status = 404, description = "Mechanic not found")
    ),
    tag = "mechanics"
)]
pub async fn get_mechanic(
    State(service): State<Arc<MechanicService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<MechanicResponseDto>>> {
    let mechanic = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(mechanic), None, None)))
}

/// Update a mechanic
///
/// Only the fields present in the body are changed.
#[utoipa::path(
    put,
    path = "/mechanics/{id}",
    params(
        ("id" = i64, Path, description = "Mechanic ID")
    ),
    request_body = UpdateMechanicDto,
    responses(
        (status = 200, description = "Mechanic updated", body = ApiResponse<MechanicResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Mechanic not found"),
        (status = 409, description = "Email already registered")
    ),
    tag = "mechanics"
)]
pub async fn update_mechanic(
    State(service): State<Arc<MechanicService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateMechanicDto>,
) -> Result<Json<ApiResponse<MechanicResponseDto>>> {
    dto.validate()?;

    let mechanic = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(mechanic),
        Some("Mechanic updated successfully".to_string()),
        None,
    )))
}

/// Delete a mechanic
///
/// Any ticket assignments of the mechanic are removed as well.
#[utoipa::path(
    delete,
    path = "/mechanics/{id}",
    params(
        ("id" = i64, Path, description = "Mechanic ID")
    ),
    responses(
        (status = 200, description = "Mechanic deleted"),
        (status = 404, description = "Mechanic not found")
    ),
    tag = "mechanics"
)]
pub async fn delete_mechanic(
    State(service): State<Arc<MechanicService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Mechanic {} deleted successfully", id)),
        None,
    )))
}
