//! Integration tests for the health API and static asset routes.
//!
//! These drive the real router in-process with `tower::ServiceExt::oneshot`.
//! The database tests point the lazy pool at an unroutable local port, so
//! they run without any external services.

use axum::body::Body;
use axum::Router;
use http::header::CACHE_CONTROL;
use http::{Request, StatusCode};
use tower::ServiceExt;

use dbpulse::config::{AppConfig, DatabaseConfig};
use dbpulse::db;
use dbpulse::routes::create_router;
use dbpulse::state::AppState;

/// Pool target where nothing is listening. Port 1 refuses immediately, so
/// failure tests do not wait out the acquire timeout.
fn unreachable_database() -> DatabaseConfig {
    DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        max_connections: 2,
        acquire_timeout_seconds: 2,
        ..DatabaseConfig::default()
    }
}

fn test_router() -> Router {
    let config = AppConfig {
        database: unreachable_database(),
        ..AppConfig::default()
    };
    let pool = db::create_pool(&config.database);
    create_router(AppState::new(config, pool))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_reports_error_when_database_unreachable() {
    let response = test_router().oneshot(get("/api/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Database connection failed");
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn health_response_is_not_cacheable() {
    let response = test_router().oneshot(get("/api/health")).await.unwrap();

    let cache_control = response.headers().get(CACHE_CONTROL).unwrap();
    assert_eq!(cache_control, "no-store");
}

#[tokio::test]
async fn repeated_failures_do_not_exhaust_the_pool() {
    // More checks than the pool has slots; every one must come back as a
    // clean 500 rather than hanging on a leaked connection.
    let router = test_router();

    for _ in 0..8 {
        let response = router.clone().oneshot(get("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[tokio::test]
async fn index_page_serves_poller_anchors() {
    let response = test_router().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains(r#"id="status""#));
    assert!(html.contains(r#"id="details""#));
    assert!(html.contains("/js/app.js"));
}

#[tokio::test]
async fn frontend_script_polls_the_health_endpoint() {
    let response = test_router().oneshot(get("/js/app.js")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let script = body_string(response).await;
    assert!(script.contains("/api/health"));
    assert!(script.contains("setInterval"));
}

#[tokio::test]
async fn static_assets_carry_cache_header() {
    let response = test_router().oneshot(get("/css/style.css")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cache_control = response.headers().get(CACHE_CONTROL).unwrap();
    assert_eq!(cache_control, "public, max-age=300");
}

#[tokio::test]
async fn unknown_path_returns_404() {
    let response = test_router().oneshot(get("/no/such/page")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Success path against a real database. Honors the usual DB_* environment
/// variables.
#[tokio::test]
#[ignore = "requires a reachable PostgreSQL"]
async fn health_reports_success_with_live_database() {
    let config = AppConfig::load("config/default.toml").unwrap();
    let pool = db::create_pool(&config.database);
    let router = create_router(AppState::new(config, pool));

    let response = router.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Database connection successful");

    let raw = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(raw).is_ok());
}
