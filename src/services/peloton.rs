// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Peloton API client.
//!
//! Handles:
//! - Credential exchange for a session
//! - Workout listing with ride/instructor joins
//! - Per-workout performance graph fetches
//! - Raw request forwarding for the proxy gateway

use std::time::Duration;

use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{PerformanceGraph, WorkoutPage};

/// Bounded wait for every upstream call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Platform identification header the upstream requires.
const PLATFORM_HEADER: &str = "peloton-platform";

/// Login calls identify as the mobile app; API calls as the web client.
const IOS_USER_AGENT: &str = "PelotonApp/3.0.0 (iPhone; iOS 14.0; Scale/3.00)";
const WEB_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Authenticated identity for one run or one client connection.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub session_id: String,
}

impl Session {
    /// Session cookie the API expects on authorized calls.
    pub fn cookie(&self) -> String {
        format!("peloton_session_id={};", self.session_id)
    }
}

/// Raw upstream exchange, relayed verbatim by the proxy.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Login response; both identity fields must be present for success.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    session_id: Option<String>,
    user_id: Option<String>,
}

/// Peloton API client.
#[derive(Clone)]
pub struct PelotonClient {
    http: reqwest::Client,
    base_url: String,
}

impl PelotonClient {
    /// Create a new client against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Exchange credentials for a session.
    ///
    /// Fails with `AppError::Auth` on a non-success status or a success
    /// response lacking either identity field. Callers must not proceed
    /// to any other call after a failure.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Session, AppError> {
        let body = serde_json::json!({
            "username_or_email": username,
            "password": password,
        });

        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .header(PLATFORM_HEADER, "ios")
            .header(USER_AGENT, IOS_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Auth(format!(
                "login returned HTTP {}",
                response.status()
            )));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("login body: {}", e)))?;

        match (auth.user_id, auth.session_id) {
            (Some(user_id), Some(session_id)) => Ok(Session {
                user_id,
                session_id,
            }),
            _ => Err(AppError::Auth(
                "login response missing session identity".to_string(),
            )),
        }
    }

    /// Fetch one page of workout summaries with ride/instructor joins.
    pub async fn list_workouts(
        &self,
        session: &Session,
        limit: u32,
        page: u32,
    ) -> Result<WorkoutPage, AppError> {
        let path = format!(
            "/api/user/{}/workouts?joins=ride,ride.instructor&limit={}&page={}",
            urlencoding::encode(&session.user_id),
            limit,
            page
        );
        self.get_json(&path, session).await
    }

    /// Fetch the performance graph for one workout.
    pub async fn performance_graph(
        &self,
        session: &Session,
        workout_id: &str,
        every_n: u32,
    ) -> Result<PerformanceGraph, AppError> {
        let path = format!(
            "/api/workout/{}/performance_graph?every_n={}",
            urlencoding::encode(workout_id),
            every_n
        );
        self.get_json(&path, session).await
    }

    /// Generic authorized GET with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        session: &Session,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header(reqwest::header::COOKIE, session.cookie())
            .header(PLATFORM_HEADER, "web")
            .header(USER_AGENT, WEB_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Fetch(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Parse(e.to_string()))
    }

    // ─── Raw forwarding (proxy gateway) ──────────────────────────────

    /// Forward a login body upstream, returning status and body verbatim.
    pub async fn forward_login(
        &self,
        body: &serde_json::Value,
    ) -> Result<UpstreamResponse, AppError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .header(PLATFORM_HEADER, "ios")
            .header(USER_AGENT, IOS_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        Self::read_upstream(response).await
    }

    /// Forward an authorized GET upstream, returning status and body
    /// verbatim.
    pub async fn forward_get(
        &self,
        path: &str,
        session_id: &str,
    ) -> Result<UpstreamResponse, AppError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header(
                reqwest::header::COOKIE,
                format!("peloton_session_id={};", session_id),
            )
            .header(PLATFORM_HEADER, "web")
            .header(USER_AGENT, WEB_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        Self::read_upstream(response).await
    }

    async fn read_upstream(response: reqwest::Response) -> Result<UpstreamResponse, AppError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let body: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            let preview: String = text.chars().take(500).collect();
            AppError::Parse(format!("{}; raw response: {}", e, preview))
        })?;

        Ok(UpstreamResponse { status, body })
    }
}
