// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display-ready report records, summary aggregates, and the export
//! document.
//!
//! Field names serialize in camelCase because the artifact is consumed
//! by the dashboard frontend, which predates this backend.

use serde::Serialize;

use crate::models::performance::EnrichedWorkout;

/// Which source populated the distance field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceSource {
    PerformanceGraph,
    Workout,
    WorkoutTotal,
    Ride,
    RideDisplay,
    None,
}

/// Which source populated the calories field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaloriesSource {
    PerformanceGraph,
    Workout,
    WorkoutTotal,
    None,
}

/// Which timestamps produced the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationSource {
    StartEnd,
    Ride,
    None,
}

/// Which timestamp produced the rider's local workout date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutDateSource {
    DeviceTime,
    CreatedAt,
    None,
}

/// Which timestamp produced the class recording date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassDateSource {
    OriginalAirTime,
    ScheduledStart,
    RideCreated,
    None,
}

/// Fully resolved, display-ready workout record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    /// Workout ID, preserved 1:1 from the raw record
    pub id: String,
    /// When the rider worked out, rendered in the workout's own zone
    pub date: String,
    /// Class title plus its recording date
    pub class_name: String,
    pub instructor_name: String,
    /// Minutes
    pub duration: i64,
    /// Kilojoules
    pub total_output: f64,
    pub calories: f64,
    /// Miles, one decimal
    pub distance: String,
    /// Rounded rpm; absent without detailed metrics
    pub avg_cadence: Option<f64>,
    /// Rounded percent
    pub avg_resistance: Option<f64>,
    /// Miles per hour, one decimal
    pub avg_speed: Option<f64>,
    pub has_detailed_metrics: bool,
    pub distance_source: DistanceSource,
    pub calories_source: CaloriesSource,
    pub duration_source: DurationSource,
    pub workout_date_source: WorkoutDateSource,
    pub class_date_source: ClassDateSource,
}

/// Summary statistics over one fetched collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_workouts: usize,
    /// Miles, one decimal
    pub total_distance: String,
    pub total_calories: f64,
    /// Workouts that received performance detail
    pub performance_data_count: usize,
}

impl SummaryStats {
    /// Reduce an enriched collection into summary totals.
    ///
    /// Distance and calories prefer the enriched value and fall back to
    /// the workout's own field; a zero value falls through like an
    /// absent one. An empty collection yields zero-valued stats.
    pub fn from_workouts(workouts: &[EnrichedWorkout]) -> Self {
        let total_distance: f64 = workouts
            .iter()
            .map(|w| {
                positive(w.enrichment.as_ref().map(|e| e.distance))
                    .or_else(|| positive(w.workout.distance))
                    .unwrap_or(0.0)
            })
            .sum();

        let total_calories: f64 = workouts
            .iter()
            .map(|w| {
                positive(w.enrichment.as_ref().map(|e| e.calories))
                    .or_else(|| positive(w.workout.calories))
                    .unwrap_or(0.0)
            })
            .sum();

        Self {
            total_workouts: workouts.len(),
            total_distance: format!("{:.1}", total_distance),
            total_calories,
            performance_data_count: workouts
                .iter()
                .filter(|w| w.enrichment.is_some())
                .count(),
        }
    }
}

/// The persisted export artifact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExport {
    pub summary: SummaryStats,
    pub workouts: Vec<ReportRecord>,
    pub raw_data: Vec<EnrichedWorkout>,
    /// RFC3339 export timestamp
    pub exported_at: String,
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}
