// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Credentials are only required by the report pipeline; the proxy never
//! sees them because clients supply their own session tokens per request.

use std::env;

/// Default upstream API base URL.
pub const DEFAULT_API_URL: &str = "https://api.onepeloton.com";

/// Shared configuration for both binaries, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Peloton API base URL (override for tests/mocks)
    pub api_base_url: String,
    /// Proxy server port
    pub port: u16,
    /// Export artifact path
    pub export_path: String,
    /// Workout page size requested from the listing endpoint
    pub workout_limit: u32,
    /// How many recent workouts get a per-workout detail request
    pub detail_limit: usize,
}

/// Peloton account credentials for the report pipeline.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            port: 3000,
            export_path: "peloton_cycling_data.json".to_string(),
            workout_limit: 100,
            detail_limit: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_base_url: env::var("PELOTON_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            export_path: env::var("EXPORT_PATH")
                .unwrap_or_else(|_| "peloton_cycling_data.json".to_string()),
            workout_limit: env::var("WORKOUT_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
            detail_limit: env::var("DETAIL_LIMIT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
        })
    }
}

impl Credentials {
    /// Load account credentials from environment variables.
    ///
    /// Must be checked before the first network call: a missing variable
    /// is a fatal, user-reported condition.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            username: env::var("PELOTON_USERNAME")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("PELOTON_USERNAME"))?,
            password: env::var("PELOTON_PASSWORD")
                .map_err(|_| ConfigError::Missing("PELOTON_PASSWORD"))?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
