// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw workout records as returned by the Peloton listing endpoint.
//!
//! Nearly every field is optional: the upstream populates them
//! inconsistently across bike generations and app versions, and the
//! normalizer resolves the gaps.

use serde::{Deserialize, Serialize};

/// Discipline tag this system cares about.
pub const CYCLING_DISCIPLINE: &str = "cycling";

/// One raw workout summary from `GET /api/user/{id}/workouts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWorkout {
    /// Workout ID (stable, unique)
    pub id: String,
    /// Creation timestamp (epoch seconds)
    pub created_at: Option<i64>,
    /// Creation timestamp as seen by the device's local clock
    pub device_time_created_at: Option<i64>,
    /// Pedaling start (epoch seconds)
    pub start_time: Option<i64>,
    /// Pedaling end (epoch seconds)
    pub end_time: Option<i64>,
    /// Total work in Joules
    pub total_work: Option<f64>,
    /// Discipline tag ("cycling", "running", ...)
    pub fitness_discipline: Option<String>,
    /// Fixed-offset zone label like "Etc/GMT+8"
    pub timezone: Option<String>,
    /// Distance in miles, when the bike reported one
    pub distance: Option<f64>,
    pub total_distance: Option<f64>,
    pub calories: Option<f64>,
    pub total_calories: Option<f64>,
    /// Class metadata (joined via `joins=ride,ride.instructor`)
    pub ride: Option<Ride>,
}

/// Static metadata about the class a workout was ridden against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ride {
    pub title: Option<String>,
    /// Planned class length in seconds
    pub duration: Option<i64>,
    pub instructor: Option<Instructor>,
    pub created_at: Option<i64>,
    pub scheduled_start_time: Option<i64>,
    /// When the class was originally recorded (epoch seconds)
    pub original_air_time: Option<i64>,
    pub distance: Option<f64>,
    /// Display string like "12.3 mi"
    pub distance_display_value: Option<String>,
    pub distance_unit: Option<String>,
    pub fitness_discipline: Option<String>,
}

/// Instructor join record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    pub name: Option<String>,
}

/// One page of workout summaries.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutPage {
    #[serde(default)]
    pub data: Vec<RawWorkout>,
}

impl RawWorkout {
    /// True when the workout or its ride metadata is tagged cycling.
    pub fn is_cycling(&self) -> bool {
        self.fitness_discipline.as_deref() == Some(CYCLING_DISCIPLINE)
            || self
                .ride
                .as_ref()
                .and_then(|r| r.fitness_discipline.as_deref())
                == Some(CYCLING_DISCIPLINE)
    }
}
