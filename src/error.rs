//! Application error type and its JSON response mapping.
//!
//! Errors are caught at the handler boundary by axum's `IntoResponse` and
//! converted into the API's error payload. The fixed `message` stays generic;
//! the `error` field carries the underlying driver text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: &'static str,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            AppError::Database(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database connection failed",
                err.to_string(),
            ),
        };

        tracing::warn!(error = %detail, "request failed");

        let body = ErrorBody {
            status: "error",
            message,
            error: detail,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn database_error_maps_to_500_json() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Database connection failed");
        assert!(!body["error"].as_str().unwrap().is_empty());
    }
}
