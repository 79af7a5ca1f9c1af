//! HTTP route assembly.
//!
//! The API and the static frontend carry different Cache-Control policies:
//! health responses are never cacheable, static assets get a short public
//! cache. Request tracing is enabled via middleware that generates a unique
//! request ID for each incoming request.

pub mod health;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::{CACHE_CONTROL_HEALTH, CACHE_CONTROL_STATIC};
use crate::http::static_files::create_static_service;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with the API routes and the static fallback.
pub fn create_router(state: AppState) -> Router {
    // Health check - a stale verdict is worse than no verdict
    let api_routes = Router::new()
        .route("/api/health", get(health::check))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    // Static frontend - everything that is not /api/*
    let static_routes = Router::new()
        .fallback_service(create_static_service(&state.config.http.static_dir))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATIC),
        ));

    Router::new()
        .merge(api_routes)
        .fallback_service(static_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
