use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::mechanics::handlers;
use crate::features::mechanics::services::MechanicService;

/// Create routes for the mechanics feature
pub fn routes(service: Arc<MechanicService>) -> Router {
    Router::new()
        .route(
            "/mechanics",
            get(handlers::list_mechanics).post(handlers::create_mechanic),
        )
        .route(
            "/mechanics/",
            get(handlers::list_mechanics).post(handlers::create_mechanic),
        )
        .route(
            "/mechanics/{id}",
            get(handlers::get_mechanic)
                .put(handlers::update_mechanic)
                .delete(handlers::delete_mechanic),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::features::mechanics::dtos::MechanicResponseDto;
    use crate::shared::test_helpers::test_server;
    use crate::shared::types::ApiResponse;

    #[tokio::test]
    async fn test_create_returns_201_with_id() {
        let server = test_server();

        let response = server
            .post("/mechanics/")
            .json(&json!({ "name": "Sam", "email": "sam@shop.test" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<ApiResponse<MechanicResponseDto>>();
        let mechanic = body.data.unwrap();
        assert_eq!(mechanic.id, 1);
        assert_eq!(mechanic.name, "Sam");
    }

    #[tokio::test]
    async fn test_collection_route_without_trailing_slash() {
        let server = test_server();

        server
            .post("/mechanics")
            .json(&json!({ "name": "Sam", "email": "sam@shop.test" }))
            .await
            .assert_status(StatusCode::CREATED);

        let body = server
            .get("/mechanics")
            .await
            .json::<ApiResponse<Vec<MechanicResponseDto>>>();
        assert_eq!(body.meta.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_create_invalid_payload_returns_400_with_field_errors() {
        let server = test_server();

        let response = server
            .post("/mechanics/")
            .json(&json!({ "name": " ", "email": "nope" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ApiResponse<()>>();
        assert!(!body.success);
        let errors = body.errors.unwrap();
        assert!(errors.iter().any(|e| e.starts_with("email:")));
        assert!(errors.iter().any(|e| e.starts_with("name:")));
    }

    #[tokio::test]
    async fn test_create_missing_email_returns_400() {
        let server = test_server();

        server
            .post("/mechanics/")
            .json(&json!({ "name": "Sam" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_409() {
        let server = test_server();
        let payload = json!({ "name": "Sam", "email": "sam@shop.test" });

        server.post("/mechanics/").json(&payload).await;
        server
            .post("/mechanics/")
            .json(&payload)
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_missing_mechanic_returns_404() {
        let server = test_server();

        server
            .put("/mechanics/99")
            .json(&json!({ "name": "Alex" }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_update_then_get() {
        let server = test_server();
        server
            .post("/mechanics/")
            .json(&json!({ "name": "Sam", "email": "sam@shop.test" }))
            .await;

        server
            .put("/mechanics/1")
            .json(&json!({ "name": "Samantha", "phone": "+1 555 0100" }))
            .await
            .assert_status_ok();

        let mechanic = server
            .get("/mechanics/1")
            .await
            .json::<ApiResponse<MechanicResponseDto>>()
            .data
            .unwrap();
        assert_eq!(mechanic.name, "Samantha");
        assert_eq!(mechanic.email, "sam@shop.test");
        assert_eq!(mechanic.phone.as_deref(), Some("+1 555 0100"));
    }

    #[tokio::test]
    async fn test_delete_then_list_is_empty() {
        let server = test_server();
        server
            .post("/mechanics/")
            .json(&json!({ "name": "Sam", "email": "sam@shop.test" }))
            .await;

        server.delete("/mechanics/1").await.assert_status_ok();
        server.delete("/mechanics/1").await.assert_status_not_found();

        let body = server
            .get("/mechanics/")
            .await
            .json::<ApiResponse<Vec<MechanicResponseDto>>>();
        assert!(body.data.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_padded_email_is_trimmed_and_lowercased() {
        let server = test_server();

        let response = server
            .post("/mechanics/")
            .json(&json!({ "name": " Sam ", "email": " Sam@Shop.test " }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let mechanic = response
            .json::<ApiResponse<MechanicResponseDto>>()
            .data
            .unwrap();
        assert_eq!(mechanic.name, "Sam");
        assert_eq!(mechanic.email, "sam@shop.test");
    }

    #[tokio::test]
    async fn test_empty_phone_clears_it() {
        let server = test_server();
        server
            .post("/mechanics/")
            .json(&json!({ "name": "Sam", "email": "sam@shop.test", "phone": "555-0100" }))
            .await;

        let mechanic = server
            .put("/mechanics/1")
            .json(&json!({ "phone": "" }))
            .await
            .json::<ApiResponse<MechanicResponseDto>>()
            .data
            .unwrap();
        assert_eq!(mechanic.phone, None);
        assert_eq!(mechanic.name, "Sam");
    }

    #[tokio::test]
    async fn test_non_numeric_id_returns_400_envelope() {
        let server = test_server();

        let response = server
            .put("/mechanics/abc")
            .json(&json!({ "name": "Alex" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ApiResponse<()>>();
        assert!(!body.success);
        assert!(body.message.unwrap().starts_with("Invalid path parameter"));
    }
}
