// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Peloton-Tracker: cycling workout history, normalized and exportable
//!
//! This crate fetches a rider's workout history from the Peloton API,
//! enriches recent workouts with per-workout performance detail,
//! normalizes the inconsistently-populated records into a report model,
//! and exports summary + per-workout data as JSON. It also provides a
//! local proxy gateway so the browser dashboard can reach the API
//! without CORS or credential constraints.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::PelotonClient;

/// Shared application state for the proxy gateway.
pub struct AppState {
    pub config: Config,
    pub peloton: PelotonClient,
}
