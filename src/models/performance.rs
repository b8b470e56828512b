// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-workout performance detail from the `performance_graph` endpoint.
//!
//! The `summaries` and `average_summaries` arrays carry positional
//! semantics that are an upstream contract, not self-describing. All
//! index knowledge lives in `Enrichment::from_graph`; a schema change
//! upstream means editing that one function.

use serde::{Deserialize, Serialize};

use crate::models::workout::RawWorkout;

// summaries[]: position of each total metric
const SUMMARY_TOTAL_OUTPUT: usize = 0;
const SUMMARY_DISTANCE: usize = 1;
const SUMMARY_CALORIES: usize = 2;

// average_summaries[]: position of each average metric
const AVERAGE_OUTPUT: usize = 0;
const AVERAGE_CADENCE: usize = 1;
const AVERAGE_RESISTANCE: usize = 2;
const AVERAGE_SPEED: usize = 3;

/// One metric entry in a summaries array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSummary {
    pub display_name: Option<String>,
    pub display_unit: Option<String>,
    pub value: Option<f64>,
}

/// Response body of `GET /api/workout/{id}/performance_graph`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceGraph {
    #[serde(default)]
    pub summaries: Vec<MetricSummary>,
    #[serde(default)]
    pub average_summaries: Vec<MetricSummary>,
}

/// Scalars derived from a successful detail fetch.
///
/// An absent array index extracts as 0; the distinction between "zero"
/// and "endpoint never answered" is carried by `EnrichedWorkout` keeping
/// the whole struct optional.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Enrichment {
    /// Distance in miles (summaries index 1; index 0 is total output)
    pub distance: f64,
    pub calories: f64,
    pub avg_output: f64,
    pub avg_cadence: f64,
    pub avg_resistance: f64,
    pub avg_speed: f64,
}

impl Enrichment {
    /// Extract the positional metrics from a performance graph response.
    pub fn from_graph(graph: &PerformanceGraph) -> Self {
        let value_at = |metrics: &[MetricSummary], index: usize| -> f64 {
            metrics
                .get(index)
                .and_then(|m| m.value)
                .unwrap_or(0.0)
        };

        Self {
            distance: value_at(&graph.summaries, SUMMARY_DISTANCE),
            calories: value_at(&graph.summaries, SUMMARY_CALORIES),
            avg_output: value_at(&graph.average_summaries, AVERAGE_OUTPUT),
            avg_cadence: value_at(&graph.average_summaries, AVERAGE_CADENCE),
            avg_resistance: value_at(&graph.average_summaries, AVERAGE_RESISTANCE),
            avg_speed: value_at(&graph.average_summaries, AVERAGE_SPEED),
        }
    }

    /// Total output lives at summaries index 0 but the report sources it
    /// from the workout's `total_work`; exposed for completeness checks.
    pub fn total_output_summary(graph: &PerformanceGraph) -> Option<f64> {
        graph
            .summaries
            .get(SUMMARY_TOTAL_OUTPUT)
            .and_then(|m| m.value)
    }
}

/// A raw workout plus whatever the detail endpoint yielded for it.
///
/// `enrichment` is `None` when the detail fetch failed or was skipped;
/// the workout then normalizes from its raw fields alone.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedWorkout {
    #[serde(flatten)]
    pub workout: RawWorkout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<Enrichment>,
}

impl EnrichedWorkout {
    pub fn bare(workout: RawWorkout) -> Self {
        Self {
            workout,
            enrichment: None,
        }
    }
}
