// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod performance;
pub mod report;
pub mod workout;

pub use performance::{EnrichedWorkout, Enrichment, PerformanceGraph};
pub use report::{ReportRecord, SummaryStats, WorkoutExport};
pub use workout::{RawWorkout, Ride, WorkoutPage};
