use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use resort_booking_api::app::build_router;
use resort_booking_api::config::AppConfig;
use resort_booking_api::test_helpers::memory_app;
use resort_booking_api::{AppState, create_app};
use serde_json::Value;
use tower::util::ServiceExt; // for oneshot

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/bookings")
        .header("Origin", origin)
        .header("Access-Control-Request-Method", "DELETE")
        .header("Access-Control-Request-Headers", "Content-Type")
        .body(Body::empty())
        .unwrap()
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[test]
fn build_router_smoke() {
    let _router = build_router(&AppConfig::in_memory());
}

#[tokio::test]
async fn root_reports_running() {
    let resp = memory_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Resort Booking API is running");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn unknown_route_uses_error_envelope() {
    let resp = memory_app()
        .oneshot(Request::builder().uri("/rooms").body(Body::empty()).unwrap())
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn cors_preflight_wildcard_allows_origin() {
    let mut config = AppConfig::in_memory();
    config.cors_allowed_origins = Some("*".to_string());

    let app = create_app(AppState::in_memory(), &config);
    let resp = app.oneshot(preflight("http://example.com")).await.expect("request failed");
    assert!(resp.status().is_success());

    let allowed = resp
        .headers()
        .get("access-control-allow-origin")
        .map(|v| v.to_str().unwrap_or(""));
    assert_eq!(allowed, Some("*"));
    let methods = resp
        .headers()
        .get("access-control-allow-methods")
        .map(|v| v.to_str().unwrap_or("").to_uppercase())
        .unwrap_or_default();
    assert!(methods.contains("DELETE"));
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn cors_specific_origin_allowed() {
    let mut config = AppConfig::in_memory();
    config.cors_allowed_origins = Some("http://resort.example.com, http://admin.example.com".to_string());

    let app = create_app(AppState::in_memory(), &config);
    let resp = app
        .clone()
        .oneshot(preflight("http://admin.example.com"))
        .await
        .expect("request failed");
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap_or("")),
        Some("http://admin.example.com")
    );

    let resp = app.oneshot(preflight("http://evil.example.com")).await.expect("request failed");
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn cors_disabled_without_configuration() {
    let resp = memory_app()
        .oneshot(preflight("http://example.com"))
        .await
        .expect("request failed");
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn unsupported_method_uses_error_envelope() {
    let resp = memory_app()
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri("/bookings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Route not found");
}
