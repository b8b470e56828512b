// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Normalization of raw workout records into display-ready report
//! records.
//!
//! Every derived field is resolved through a precedence chain: first
//! usable source wins, and the winning source is recorded alongside the
//! value. Numeric chains treat a zero the same as an absent value, so a
//! zero enriched distance falls through to the workout's raw fields.
//! Pure and deterministic: no network, no mutation of the input.

use crate::models::performance::EnrichedWorkout;
use crate::models::report::{
    CaloriesSource, ClassDateSource, DistanceSource, DurationSource, ReportRecord,
    WorkoutDateSource,
};
use crate::models::workout::RawWorkout;
use crate::time_utils::{civil_zone_for_label, format_class_date, format_workout_datetime};

/// Label used when a workout has no ride metadata title.
const DEFAULT_CLASS_TITLE: &str = "Cycling Workout";

/// Label used when ride metadata carries no instructor.
const DEFAULT_INSTRUCTOR: &str = "Unknown Instructor";

/// Map a raw (possibly enriched) workout to its report record.
pub fn normalize(enriched: &EnrichedWorkout) -> ReportRecord {
    let workout = &enriched.workout;
    let ride = workout.ride.as_ref();

    let (distance, distance_source) = resolve_distance(enriched);
    let (calories, calories_source) = resolve_calories(enriched);
    let (duration, duration_source) = resolve_duration(workout);

    // total_work is reported in Joules
    let total_output = match workout.total_work {
        Some(joules) => joules / 1000.0,
        None => 0.0,
    };

    let zone = civil_zone_for_label(workout.timezone.as_deref());
    let (date, workout_date_source) = match (workout.device_time_created_at, workout.created_at) {
        (Some(ts), _) => (
            format_workout_datetime(ts, &zone),
            WorkoutDateSource::DeviceTime,
        ),
        (None, Some(ts)) => (
            format_workout_datetime(ts, &zone),
            WorkoutDateSource::CreatedAt,
        ),
        (None, None) => (String::new(), WorkoutDateSource::None),
    };

    let (class_timestamp, class_date_source) = resolve_class_date(workout);
    let title = ride
        .and_then(|r| r.title.clone())
        .unwrap_or_else(|| DEFAULT_CLASS_TITLE.to_string());
    // Recording dates always render in studio (US Eastern) time
    let class_name = match class_timestamp {
        Some(ts) => format!("{} - {}", title, format_class_date(ts)),
        None => title,
    };

    let instructor_name = ride
        .and_then(|r| r.instructor.as_ref())
        .and_then(|i| i.name.clone())
        .unwrap_or_else(|| DEFAULT_INSTRUCTOR.to_string());

    let (avg_cadence, avg_resistance, avg_speed) = match &enriched.enrichment {
        Some(e) => (
            Some(e.avg_cadence.round()),
            Some(e.avg_resistance.round()),
            Some((e.avg_speed * 10.0).round() / 10.0),
        ),
        None => (None, None, None),
    };

    let has_detailed_metrics = enriched
        .enrichment
        .as_ref()
        .map(|e| e.avg_cadence != 0.0 || e.avg_resistance != 0.0 || e.avg_speed != 0.0)
        .unwrap_or(false);

    ReportRecord {
        id: workout.id.clone(),
        date,
        class_name,
        instructor_name,
        duration,
        total_output,
        calories,
        distance: format!("{:.1}", distance),
        avg_cadence,
        avg_resistance,
        avg_speed,
        has_detailed_metrics,
        distance_source,
        calories_source,
        duration_source,
        workout_date_source,
        class_date_source,
    }
}

fn resolve_distance(enriched: &EnrichedWorkout) -> (f64, DistanceSource) {
    let workout = &enriched.workout;
    let ride = workout.ride.as_ref();

    if let Some(d) = positive(enriched.enrichment.as_ref().map(|e| e.distance)) {
        return (d, DistanceSource::PerformanceGraph);
    }
    if let Some(d) = positive(workout.distance) {
        return (d, DistanceSource::Workout);
    }
    if let Some(d) = positive(workout.total_distance) {
        return (d, DistanceSource::WorkoutTotal);
    }
    if let Some(d) = positive(ride.and_then(|r| r.distance)) {
        return (d, DistanceSource::Ride);
    }
    if let Some(text) = ride
        .and_then(|r| r.distance_display_value.as_deref())
        .filter(|s| !s.is_empty())
    {
        // A present display string wins the chain even when it fails to
        // parse; the value is then 0
        return (
            parse_leading_number(text).unwrap_or(0.0),
            DistanceSource::RideDisplay,
        );
    }
    (0.0, DistanceSource::None)
}

fn resolve_calories(enriched: &EnrichedWorkout) -> (f64, CaloriesSource) {
    let workout = &enriched.workout;

    if let Some(c) = positive(enriched.enrichment.as_ref().map(|e| e.calories)) {
        return (c, CaloriesSource::PerformanceGraph);
    }
    if let Some(c) = positive(workout.calories) {
        return (c, CaloriesSource::Workout);
    }
    if let Some(c) = positive(workout.total_calories) {
        return (c, CaloriesSource::WorkoutTotal);
    }
    (0.0, CaloriesSource::None)
}

/// Duration in whole minutes. Presence, not value, decides the chain:
/// a start timestamp of 0 still pairs with its end timestamp.
fn resolve_duration(workout: &RawWorkout) -> (i64, DurationSource) {
    if let (Some(start), Some(end)) = (workout.start_time, workout.end_time) {
        let minutes = ((end - start) as f64 / 60.0).round() as i64;
        return (minutes, DurationSource::StartEnd);
    }
    if let Some(seconds) = workout.ride.as_ref().and_then(|r| r.duration) {
        return ((seconds as f64 / 60.0).round() as i64, DurationSource::Ride);
    }
    (0, DurationSource::None)
}

fn resolve_class_date(workout: &RawWorkout) -> (Option<i64>, ClassDateSource) {
    let ride = match workout.ride.as_ref() {
        Some(ride) => ride,
        None => return (None, ClassDateSource::None),
    };

    if let Some(ts) = ride.original_air_time {
        return (Some(ts), ClassDateSource::OriginalAirTime);
    }
    if let Some(ts) = ride.scheduled_start_time {
        return (Some(ts), ClassDateSource::ScheduledStart);
    }
    if let Some(ts) = ride.created_at {
        return (Some(ts), ClassDateSource::RideCreated);
    }
    (None, ClassDateSource::None)
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Parse the leading numeric portion of a display string like
/// "12.3 mi". Returns `None` when the string has no leading number.
fn parse_leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, c) in trimmed.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            '0'..='9' => seen_digit = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    trimmed[..end].parse().ok()
}
