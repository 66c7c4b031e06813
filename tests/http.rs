mod common;

use axum::body::to_bytes;
use axum::http::{header, Method, StatusCode};
use common::{call, send, seeded_pool};
use serde_json::json;
use trivia_api::server::app::app;

#[tokio::test]
async fn every_response_carries_cors_headers() {
    let pool = seeded_pool().await;
    let router = app(pool);
    for (method, uri) in [(Method::GET, "/categories"), (Method::DELETE, "/questions/1")] {
        let response = send(&router, method, uri, None).await;
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PATCH, DELETE, OPTIONS"
        );
    }
}

#[tokio::test]
async fn cross_origin_requests_are_allowed_from_anywhere() {
    let pool = seeded_pool().await;
    let request = axum::http::Request::builder()
        .uri("/categories")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app(pool), request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn unknown_paths_are_json_not_found() {
    let pool = seeded_pool().await;
    let (status, body) = call(&pool, Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"success": false, "error": 404, "message": "Not found"})
    );
}

#[tokio::test]
async fn method_mismatches_are_json() {
    let pool = seeded_pool().await;
    for (method, uri) in [
        (Method::PUT, "/questions"),
        (Method::GET, "/questions/5"),
        (Method::GET, "/questions/search"),
    ] {
        let (status, body) = call(&pool, method, uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(body["error"], 405);
    }
}

#[tokio::test]
async fn metrics_count_quiz_draws() {
    let pool = seeded_pool().await;
    let router = app(pool);
    let draw = json!({"previous_questions": [], "quiz_category": {"id": 4}});
    let response = send(&router, Method::POST, "/quizzes", Some(draw)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&router, Method::GET, "/metrics", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains(r#"quiz_questions_drawn_total{category="4"}"#));
}
