// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers for the proxy gateway.

pub mod api;
pub mod auth;

use crate::AppState;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Liveness probe response.
#[derive(Serialize)]
pub struct TestResponse {
    pub status: String,
    pub timestamp: String,
    pub message: String,
}

/// Liveness probe for the browser frontend.
async fn test_endpoint() -> Json<TestResponse> {
    Json(TestResponse {
        status: "Server is running!".to_string(),
        timestamp: crate::time_utils::format_utc_rfc3339(chrono::Utc::now()),
        message: "Backend proxy server is working correctly".to_string(),
    })
}

/// Build the complete router with all routes.
///
/// The gateway is stateless per request: handlers share only the
/// immutable `AppState`, so no locking exists anywhere on this path.
pub fn create_router(state: Arc<AppState>) -> Router {
    // The browser frontend is served from an arbitrary local origin
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/test", get(test_endpoint))
        .merge(auth::routes())
        .merge(api::routes())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
