// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authorized API forwarding.
//!
//! Each handler validates the client-supplied session token, relays the
//! equivalent upstream call, and returns the upstream status and body
//! verbatim. The workout listing additionally falls back once to the
//! `workout_history` path that serves some older accounts.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::AppState;

/// Header the frontend uses to supply the upstream session token.
pub const SESSION_HEADER: &str = "x-peloton-session";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user/{user_id}/workouts", get(get_workouts))
        .route(
            "/api/workout/{workout_id}/performance_graph",
            get(get_performance_graph),
        )
}

fn session_from_headers(headers: &HeaderMap) -> Result<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or(AppError::MissingSession)
}

#[derive(Deserialize)]
struct WorkoutsQuery {
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    page: u32,
}

fn default_limit() -> u32 {
    50
}

/// Forward a workout listing, with the documented 404 fallback.
async fn get_workouts(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<WorkoutsQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    let session_id = session_from_headers(&headers)?;
    let user_id = urlencoding::encode(&user_id).into_owned();

    let primary = format!(
        "/api/user/{}/workouts?joins=ride,ride.instructor&limit={}&page={}",
        user_id, params.limit, params.page
    );

    tracing::debug!(path = %primary, "Forwarding workout listing");
    let upstream = state.peloton.forward_get(&primary, &session_id).await?;

    if upstream.is_success() {
        return Ok((upstream.status, Json(upstream.body)).into_response());
    }

    if upstream.status != StatusCode::NOT_FOUND {
        return Ok((
            upstream.status,
            Json(json!({
                "error": "Failed to fetch workouts",
                "statusCode": upstream.status.as_u16(),
                "details": upstream.body,
            })),
        )
            .into_response());
    }

    // Retry exactly once against the path that serves older accounts
    let alternate = format!(
        "/api/user/{}/workout_history?joins=ride,ride.instructor&limit={}&page={}",
        user_id, params.limit, params.page
    );
    tracing::warn!(path = %alternate, "Primary workout path returned 404, trying alternate");

    match state.peloton.forward_get(&alternate, &session_id).await {
        Ok(alt) if alt.is_success() => Ok((alt.status, Json(alt.body)).into_response()),
        Ok(alt) => Ok((
            alt.status,
            Json(json!({
                "error": "Failed to fetch workouts from alternative endpoint",
                "statusCode": alt.status.as_u16(),
                "paths": [primary, alternate],
            })),
        )
            .into_response()),
        Err(e) => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Both workout endpoints failed",
                "originalError": "Primary path returned 404",
                "alternativeError": e.to_string(),
                "paths": [primary, alternate],
            })),
        )
            .into_response()),
    }
}

#[derive(Deserialize)]
struct PerformanceQuery {
    #[serde(default = "default_every_n")]
    every_n: u32,
}

fn default_every_n() -> u32 {
    1000
}

/// Forward a performance graph request for one workout.
async fn get_performance_graph(
    State(state): State<Arc<AppState>>,
    Path(workout_id): Path<String>,
    Query(params): Query<PerformanceQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    let session_id = session_from_headers(&headers)?;

    let path = format!(
        "/api/workout/{}/performance_graph?every_n={}",
        urlencoding::encode(&workout_id),
        params.every_n
    );

    let upstream = state.peloton.forward_get(&path, &session_id).await?;

    if upstream.is_success() {
        return Ok((upstream.status, Json(upstream.body)).into_response());
    }

    Ok((
        upstream.status,
        Json(json!({
            "error": "Failed to fetch performance data",
            "statusCode": upstream.status.as_u16(),
        })),
    )
        .into_response())
}
