use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::service_tickets::handlers::{self, ServiceTicketState};
use crate::features::service_tickets::services::{AssignmentService, ServiceTicketService};

/// Create routes for the service tickets feature
pub fn routes(
    ticket_service: Arc<ServiceTicketService>,
    assignment_service: Arc<AssignmentService>,
) -> Router {
    let state = ServiceTicketState {
        ticket_service,
        assignment_service,
    };

    Router::new()
        .route(
            "/service-tickets",
            get(handlers::list_service_tickets).post(handlers::create_service_ticket),
        )
        .route(
            "/service-tickets/",
            get(handlers::list_service_tickets).post(handlers::create_service_ticket),
        )
        .route(
            "/service-tickets/{ticket_id}",
            get(handlers::get_service_ticket),
        )
        .route(
            "/service-tickets/{ticket_id}/assign-mechanic/{mechanic_id}",
            put(handlers::assign_mechanic),
        )
        .route(
            "/service-tickets/{ticket_id}/remove-mechanic/{mechanic_id}",
            put(handlers::remove_mechanic),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::features::mechanics::dtos::MechanicResponseDto;
    use crate::features::service_tickets::dtos::ServiceTicketResponseDto;
    use crate::shared::test_helpers::test_server;
    use crate::shared::types::ApiResponse;

    async fn ticket(server: &axum_test::TestServer, id: i64) -> ServiceTicketResponseDto {
        server
            .get(&format!("/service-tickets/{}", id))
            .await
            .json::<ApiResponse<ServiceTicketResponseDto>>()
            .data
            .unwrap()
    }

    #[tokio::test]
    async fn test_assign_and_remove_end_to_end() {
        let server = test_server();

        let mechanic = server
            .post("/mechanics/")
            .json(&json!({ "name": "Sam", "email": "sam@shop.test" }))
            .await
            .json::<ApiResponse<MechanicResponseDto>>()
            .data
            .unwrap();
        assert_eq!(mechanic.id, 1);

        let created = server
            .post("/service-tickets/")
            .json(&json!({ "description": "oil change" }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let created = created
            .json::<ApiResponse<ServiceTicketResponseDto>>()
            .data
            .unwrap();
        assert_eq!(created.id, 1);

        server
            .put("/service-tickets/1/assign-mechanic/1")
            .await
            .assert_status_ok();
        let assigned = ticket(&server, 1).await;
        assert_eq!(assigned.mechanics.len(), 1);
        assert_eq!(assigned.mechanics[0].id, 1);
        assert!(assigned.mechanics[0].assigned_at >= created.created_at);

        server
            .put("/service-tickets/1/remove-mechanic/1")
            .await
            .assert_status_ok();
        assert!(ticket(&server, 1).await.mechanics.is_empty());
    }

    #[tokio::test]
    async fn test_assign_twice_keeps_single_entry() {
        let server = test_server();
        server
            .post("/mechanics/")
            .json(&json!({ "name": "Sam", "email": "sam@shop.test" }))
            .await;
        server
            .post("/service-tickets/")
            .json(&json!({ "description": "oil change" }))
            .await;

        for _ in 0..2 {
            server
                .put("/service-tickets/1/assign-mechanic/1")
                .await
                .assert_status_ok();
        }

        let tickets = server
            .get("/service-tickets/")
            .await
            .json::<ApiResponse<Vec<ServiceTicketResponseDto>>>()
            .data
            .unwrap();
        assert_eq!(tickets[0].mechanics.len(), 1);
    }

    #[tokio::test]
    async fn test_assign_unknown_ids_returns_404() {
        let server = test_server();

        server
            .put("/service-tickets/1/assign-mechanic/1")
            .await
            .assert_status_not_found();

        server
            .post("/service-tickets/")
            .json(&json!({ "description": "oil change" }))
            .await;
        server
            .put("/service-tickets/1/assign-mechanic/9")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_remove_never_assigned_returns_404() {
        let server = test_server();
        server
            .post("/mechanics/")
            .json(&json!({ "name": "Sam", "email": "sam@shop.test" }))
            .await;
        server
            .post("/service-tickets/")
            .json(&json!({ "description": "oil change" }))
            .await;

        server
            .put("/service-tickets/1/remove-mechanic/1")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_deleted_mechanic_disappears_from_ticket() {
        let server = test_server();
        server
            .post("/mechanics/")
            .json(&json!({ "name": "Sam", "email": "sam@shop.test" }))
            .await;
        server
            .post("/service-tickets/")
            .json(&json!({ "description": "oil change" }))
            .await;
        server.put("/service-tickets/1/assign-mechanic/1").await;

        server.delete("/mechanics/1").await.assert_status_ok();

        assert!(ticket(&server, 1).await.mechanics.is_empty());
    }

    #[tokio::test]
    async fn test_create_blank_description_returns_400() {
        let server = test_server();

        server
            .post("/service-tickets/")
            .json(&json!({ "description": "  " }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_json_body_returns_400() {
        let server = test_server();

        server
            .post("/service-tickets/")
            .text("description=oil change")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_numeric_ids_return_400_envelope() {
        let server = test_server();

        let response = server.put("/service-tickets/1/assign-mechanic/abc").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ApiResponse<()>>();
        assert!(!body.success);
        assert!(body.message.unwrap().starts_with("Invalid path parameter"));

        server
            .get("/service-tickets/first")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
