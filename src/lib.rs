pub mod catalog;
pub mod config;
pub mod handlers;
pub mod models;
pub mod prompt;
pub mod services;
pub mod session;
pub mod utils;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::status::StatusState;
use services::ChatService;

pub fn build_router(chat_service: Arc<ChatService>, status: Arc<StatusState>) -> Router {
    Router::new()
        .route("/", get(handlers::status::status_handler))
        .route("/chat", post(handlers::chat::chat_handler))
        .route("/clear", post(handlers::chat::clear_handler))
        .layer(Extension(chat_service))
        .layer(Extension(status))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use crate::catalog::{CatalogEntry, CatalogStore};
    use crate::prompt::PromptBuilder;
    use crate::services::llm_service::MockGenerativeBackend;
    use crate::session::SessionStore;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_router(backend: MockGenerativeBackend) -> Router {
        let catalog = Arc::new(CatalogStore::from_entries(vec![CatalogEntry {
            keywords: vec!["neon box".to_string(), "harga".to_string()],
            data: json!({"name": "Neon Box A", "price": 500000}),
        }]));
        let service = Arc::new(ChatService::new(
            catalog,
            SessionStore::new(Duration::from_secs(3600)),
            Arc::new(backend),
            PromptBuilder::default(),
            1500,
        ));
        let status = Arc::new(StatusState {
            api_key_configured: false,
        });
        build_router(service, status)
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_without_message_is_400() {
        let router = test_router(MockGenerativeBackend::new());

        let response = router
            .oneshot(json_request("/chat", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Message is required");
    }

    #[tokio::test]
    async fn test_chat_returns_reply_and_timestamp() {
        let mut backend = MockGenerativeBackend::new();
        backend
            .expect_generate()
            .returning(|_| Ok("Harga neon box Rp500.000.".to_string()));
        let router = test_router(backend);

        let response = router
            .oneshot(json_request(
                "/chat",
                json!({"message": "berapa harga neon box?", "sessionId": "s1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["reply"], "Harga neon box Rp500.000.");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_backend_failure_is_500_with_details() {
        let mut backend = MockGenerativeBackend::new();
        backend
            .expect_generate()
            .returning(|_| Err(anyhow::anyhow!("quota exceeded")));
        let router = test_router(backend);

        let response = router
            .oneshot(json_request("/chat", json!({"message": "halo"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal Server Error");
        assert!(body["details"].as_str().unwrap().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let router = test_router(MockGenerativeBackend::new());

        let response = router
            .oneshot(json_request("/clear", json!({"sessionId": "never-created"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_status_reports_key_and_catalog() {
        let router = test_router(MockGenerativeBackend::new());

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("API key configured: no"));
        assert!(text.contains("1 entries loaded"));
    }
}
