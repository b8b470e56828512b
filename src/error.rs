// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// `Auth` and `Fetch` are fatal for a pipeline run; `DetailFetch` is
/// recovered per item by the enricher and never aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Session token required")]
    MissingSession,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Failed to fetch workouts: {0}")]
    Fetch(String),

    #[error("No performance data for workout {workout_id}: {reason}")]
    DetailFetch { workout_id: String, reason: String },

    #[error("Peloton API unreachable: {0}")]
    Transport(String),

    #[error("Invalid response from Peloton API: {0}")]
    Parse(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, "auth_failed", Some(msg.clone())),
            AppError::MissingSession => (StatusCode::UNAUTHORIZED, "session_required", None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Fetch(msg) => (StatusCode::BAD_GATEWAY, "fetch_error", Some(msg.clone())),
            AppError::DetailFetch { workout_id, reason } => (
                StatusCode::BAD_GATEWAY,
                "performance_data_error",
                Some(format!("workout {}: {}", workout_id, reason)),
            ),
            AppError::Transport(msg) => (
                StatusCode::BAD_GATEWAY,
                "upstream_unreachable",
                Some(msg.clone()),
            ),
            AppError::Parse(msg) => (
                StatusCode::BAD_GATEWAY,
                "invalid_upstream_response",
                Some(msg.clone()),
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
