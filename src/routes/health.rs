//! Database connectivity check endpoint.
//!
//! The probe acquires a pooled connection, asks PostgreSQL for its current
//! time, and reports the outcome. A failure of any kind (acquisition timeout,
//! authentication, network) surfaces as the 500 error payload; nothing is
//! retried.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::db;
use crate::error::AppError;
use crate::state::AppState;

/// Payload returned when the database answered the probe.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    /// The database server's clock, RFC 3339
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    fn success(timestamp: DateTime<Utc>) -> Self {
        Self {
            status: "success",
            message: "Database connection successful",
            timestamp,
        }
    }
}

/// Health check handler.
#[instrument(name = "health::check", skip(state))]
pub async fn check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let timestamp = db::fetch_server_time(&state.pool).await?;
    tracing::debug!(%timestamp, "database reachable");
    Ok(Json(HealthResponse::success(timestamp)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_payload_shape() {
        let timestamp = "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let body = serde_json::to_value(HealthResponse::success(timestamp)).unwrap();

        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Database connection successful");

        // The serialized timestamp must round-trip as RFC 3339
        let raw = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(raw).is_ok());
    }
}
