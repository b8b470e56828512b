// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use peloton_tracker::config::Config;
use peloton_tracker::routes::create_router;
use peloton_tracker::services::PelotonClient;
use peloton_tracker::AppState;
use serde_json::{json, Value};
use std::sync::Arc;

/// Create a proxy app forwarding to the given (mock) upstream.
#[allow(dead_code)]
pub fn create_test_app(upstream_url: &str) -> axum::Router {
    let config = Config {
        api_base_url: upstream_url.to_string(),
        ..Config::default()
    };
    let peloton = PelotonClient::new(upstream_url.to_string());

    let state = Arc::new(AppState { config, peloton });
    create_router(state)
}

/// Minimal raw workout JSON as the listing endpoint returns it.
#[allow(dead_code)]
pub fn workout_json(id: &str, discipline: &str, created_at: i64) -> Value {
    json!({
        "id": id,
        "created_at": created_at,
        "fitness_discipline": discipline,
        "timezone": "Etc/GMT+8",
        "ride": {
            "title": "30 min Climb Ride",
            "duration": 1800,
            "fitness_discipline": discipline,
            "instructor": { "name": "Test Instructor" }
        }
    })
}

/// Performance graph JSON with full summaries/average arrays.
#[allow(dead_code)]
pub fn performance_graph_json(distance: f64, calories: f64) -> Value {
    json!({
        "summaries": [
            { "display_name": "Total Output", "display_unit": "kj", "value": 290.0 },
            { "display_name": "Distance", "display_unit": "mi", "value": distance },
            { "display_name": "Calories", "display_unit": "kcal", "value": calories }
        ],
        "average_summaries": [
            { "display_name": "Avg Output", "display_unit": "watts", "value": 161.0 },
            { "display_name": "Avg Cadence", "display_unit": "rpm", "value": 82.0 },
            { "display_name": "Avg Resistance", "display_unit": "%", "value": 48.0 },
            { "display_name": "Avg Speed", "display_unit": "mph", "value": 18.6 }
        ]
    })
}
