use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};

use crate::features::mechanics::{routes as mechanics_routes, MechanicService};
use crate::features::service_tickets::{
    routes as service_tickets_routes, AssignmentService, ServiceTicketService,
};
use crate::modules::persistence::ShopStore;

/// Feature services sharing one store handle
pub struct AppServices {
    pub mechanic_service: Arc<MechanicService>,
    pub ticket_service: Arc<ServiceTicketService>,
    pub assignment_service: Arc<AssignmentService>,
}

impl AppServices {
    pub fn new(store: Arc<dyn ShopStore>) -> Self {
        let mechanic_service = Arc::new(MechanicService::new(Arc::clone(&store)));
        let ticket_service = Arc::new(ServiceTicketService::new(Arc::clone(&store)));
        let assignment_service = Arc::new(AssignmentService::new(
            store,
            Arc::clone(&ticket_service),
        ));

        Self {
            mechanic_service,
            ticket_service,
            assignment_service,
        }
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Every API route plus `/health`, without docs or transport layers
pub fn api_routes(services: &AppServices) -> Router {
    Router::new()
        .merge(mechanics_routes::routes(Arc::clone(&services.mechanic_service)))
        .merge(service_tickets_routes::routes(
            Arc::clone(&services.ticket_service),
            Arc::clone(&services.assignment_service),
        ))
        .route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use crate::shared::test_helpers::test_server;

    #[tokio::test]
    async fn test_health_check() {
        test_server().get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        test_server().get("/nope").await.assert_status_not_found();
    }
}
