mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use cinema_recs::api::{create_router, AppState};
use cinema_recs::models::{HealthResponse, RecommendationResponse};
use cinema_recs::services::RecommendationEngine;

fn create_test_server() -> TestServer {
    let engine = RecommendationEngine::from_readers(
        common::CATALOG.as_bytes(),
        common::TITLE_INDEX.as_bytes(),
        common::feature_matrix().to_string().as_bytes(),
    )
    .unwrap();
    let state = AppState::new(Arc::new(engine));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let health: HealthResponse = response.json();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.items, 6);
}

#[tokio::test]
async fn test_recommendations() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "title": "  inception ",
            "top_n": 2
        }))
        .await;

    response.assert_status_ok();
    let body: RecommendationResponse = response.json();
    assert!(body.matched);
    assert_eq!(body.query, "  inception ");

    let titles: Vec<&str> = body.recommendations.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["The Matrix", "Interstellar"]);
    assert_eq!(body.recommendations[0].id, Some(603));
    assert!(body.recommendations[0].score >= body.recommendations[1].score);
}

#[tokio::test]
async fn test_recommendations_default_top_n() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Up" }))
        .await;

    response.assert_status_ok();
    let body: RecommendationResponse = response.json();
    assert_eq!(body.recommendations.len(), 5);
    assert!(body.recommendations.iter().all(|r| r.title != "Up"));
}

#[tokio::test]
async fn test_recommendations_negative_top_n() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Up", "top_n": -1 }))
        .await;

    response.assert_status_ok();
    let body: RecommendationResponse = response.json();
    assert!(body.matched);
    assert!(body.recommendations.is_empty());
}

#[tokio::test]
async fn test_recommendations_unknown_title() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "definitely-not-a-title-xyz123", "top_n": 5 }))
        .await;

    response.assert_status_ok();
    let body: RecommendationResponse = response.json();
    assert!(!body.matched);
    assert!(body.recommendations.is_empty());
}

#[tokio::test]
async fn test_recommendations_blank_title() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "title must not be blank");
}

#[tokio::test]
async fn test_title_lookup() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/titles/lookup")
        .add_query_param("title", "THE MATRIX")
        .await;

    response.assert_status_ok();
    let item: serde_json::Value = response.json();
    assert_eq!(item["position"], 2);
    assert_eq!(item["title"], "The Matrix");
    assert_eq!(item["id"], 603);
}

#[tokio::test]
async fn test_title_lookup_not_found() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/titles/lookup")
        .add_query_param("title", "Solaris")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let request_id = "6f1c1a64-3b1e-4d7c-9f55-0a1b2c3d4e5f";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(request_id),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), request_id);
}
