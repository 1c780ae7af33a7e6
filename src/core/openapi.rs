use utoipa::{Modify, OpenApi};

use crate::features::mechanics::{dtos as mechanics_dtos, handlers as mechanics_handlers};
use crate::features::service_tickets::{
    dtos as service_tickets_dtos, handlers as service_tickets_handlers,
    models as service_tickets_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Mechanics
        mechanics_handlers::create_mechanic,
        mechanics_handlers::list_mechanics,
        mechanics_handlers::get_mechanic,
        mechanics_handlers::update_mechanic,
        mechanics_handlers::delete_mechanic,
        // Service tickets
        service_tickets_handlers::create_service_ticket,
        service_tickets_handlers::list_service_tickets,
        service_tickets_handlers::get_service_ticket,
        service_tickets_handlers::assign_mechanic,
        service_tickets_handlers::remove_mechanic,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Mechanics
            mechanics_dtos::CreateMechanicDto,
            mechanics_dtos::UpdateMechanicDto,
            mechanics_dtos::MechanicResponseDto,
            ApiResponse<mechanics_dtos::MechanicResponseDto>,
            ApiResponse<Vec<mechanics_dtos::MechanicResponseDto>>,
            // Service tickets
            service_tickets_models::TicketStatus,
            service_tickets_dtos::CreateServiceTicketDto,
            service_tickets_dtos::AssignedMechanicDto,
            service_tickets_dtos::ServiceTicketResponseDto,
            ApiResponse<service_tickets_dtos::ServiceTicketResponseDto>,
            ApiResponse<Vec<service_tickets_dtos::ServiceTicketResponseDto>>,
        )
    ),
    tags(
        (name = "mechanics", description = "Repair shop mechanics"),
        (name = "service-tickets", description = "Service tickets and mechanic assignments"),
    ),
    info(
        title = "Repair Shop API",
        version = "0.1.0",
        description = "Mechanics and service tickets for the repair shop",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
