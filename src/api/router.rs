//! Intake API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the intake API router.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    Router::new()
        .route("/api/health", get(endpoints::health::check))
        .route("/api/chat", post(endpoints::chat::send))
        .route("/api/reset", post(endpoints::chat::reset))
        .route("/api/history", get(endpoints::history::recent))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router() -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("triago.db");
        let conn = db::open_database(&db_path).unwrap();
        db::seed_catalog(&conn).unwrap();
        drop(conn);

        let core = Arc::new(CoreState::new(db_path));
        (dir, api_router(core))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_seeded_catalog() {
        let (_dir, router) = test_router();

        let response = router
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["symptom_count"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn chat_without_session_creates_one() {
        let (_dir, router) = test_router();

        let response = router
            .oneshot(post_json("/api/chat", json!({"message": "I have a fever"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["session_id"].as_str().is_some());
        assert!(body["response"].as_str().unwrap().contains("Symptom recorded"));
    }

    #[tokio::test]
    async fn chat_rejects_blank_message() {
        let (_dir, router) = test_router();

        let response = router
            .oneshot(post_json("/api/chat", json!({"message": "   "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn chat_rejects_unknown_session() {
        let (_dir, router) = test_router();

        let response = router
            .oneshot(post_json(
                "/api/chat",
                json!({
                    "session_id": "00000000-0000-0000-0000-000000000000",
                    "message": "fever"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reset_returns_no_content() {
        let (_dir, router) = test_router();

        let response = router
            .oneshot(post_json(
                "/api/reset",
                json!({"session_id": "00000000-0000-0000-0000-000000000001"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn full_consultation_over_http() {
        let (_dir, router) = test_router();

        // Collect a symptom; the seeded catalog knows "fever".
        let response = router
            .clone()
            .oneshot(post_json("/api/chat", json!({"message": "I have a fever"})))
            .await
            .unwrap();
        let body = body_json(response).await;
        let session_id = body["session_id"].as_str().unwrap().to_string();

        // Stop collecting; fever has follow-up questions in the seed data.
        let response = router
            .clone()
            .oneshot(post_json(
                "/api/chat",
                json!({"session_id": &session_id, "message": "stop"}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert!(body["response"]
            .as_str()
            .unwrap()
            .contains("Follow-up Question 1 of"));

        // Answer every follow-up until the diagnosis arrives.
        let mut last = String::new();
        for _ in 0..10 {
            let response = router
                .clone()
                .oneshot(post_json(
                    "/api/chat",
                    json!({"session_id": &session_id, "message": "three days"}),
                ))
                .await
                .unwrap();
            let body = body_json(response).await;
            last = body["response"].as_str().unwrap().to_string();
            if last.contains("<b>Diagnosis:</b>") {
                break;
            }
        }
        assert!(last.contains("<b>Diagnosis:</b>"));
        assert!(last.contains("<b>First Aid:</b>"));

        // The completed consultation is in the history.
        let response = router
            .oneshot(Request::builder().uri("/api/history").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        let consultations = body["consultations"].as_array().unwrap();
        assert_eq!(consultations.len(), 1);
        assert_eq!(consultations[0]["user_query"], "fever");
    }
}
