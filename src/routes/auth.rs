// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login forwarding.
//!
//! The gateway holds no credentials and keeps no session state: the
//! upstream's session token goes back to the client verbatim and is
//! never persisted here. Login calls are never retried.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/login", post(login))
}

/// Login request from the browser frontend.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Forward a login to the upstream, substituting platform headers.
///
/// 400 when either field is missing; 401 when the upstream rejects the
/// credentials or answers 200 without both identity fields; any other
/// upstream status is relayed with its body as details.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Response> {
    let (username, password) = match (body.username, body.password) {
        (Some(u), Some(p)) if !u.trim().is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(AppError::BadRequest(
                "Username and password are required".to_string(),
            ))
        }
    };

    tracing::info!("Forwarding login request");

    let payload = json!({
        "username_or_email": username.trim(),
        "password": password,
    });

    let upstream = state.peloton.forward_login(&payload).await?;

    if upstream.status == StatusCode::OK {
        let has_identity = upstream.body.get("session_id").and_then(|v| v.as_str()).is_some()
            && upstream.body.get("user_id").and_then(|v| v.as_str()).is_some();

        if has_identity {
            tracing::info!("Login forwarded successfully");
            return Ok(Json(upstream.body).into_response());
        }

        tracing::warn!("Upstream login response missing identity fields");
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid credentials - missing session data",
            })),
        )
            .into_response());
    }

    if upstream.status == StatusCode::UNAUTHORIZED {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid username or password",
                "statusCode": upstream.status.as_u16(),
            })),
        )
            .into_response());
    }

    tracing::warn!(status = %upstream.status, "Unexpected upstream login status");
    Ok((
        upstream.status,
        Json(json!({
            "error": "Authentication failed - unexpected response",
            "statusCode": upstream.status.as_u16(),
            "details": upstream.body,
        })),
    )
        .into_response())
}
