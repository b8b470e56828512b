// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Export of the normalized report to a JSON artifact.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::AppError;
use crate::models::performance::EnrichedWorkout;
use crate::models::report::{ReportRecord, SummaryStats, WorkoutExport};
use crate::time_utils::format_utc_rfc3339;

/// Write the export document to `path`, overwriting silently.
///
/// Returns the location written. The artifact is consumed by the
/// dashboard frontend and downstream analysis tools.
pub fn save_report(
    path: &Path,
    summary: SummaryStats,
    workouts: Vec<ReportRecord>,
    raw_data: Vec<EnrichedWorkout>,
) -> Result<PathBuf, AppError> {
    let export = WorkoutExport {
        summary,
        workouts,
        raw_data,
        exported_at: format_utc_rfc3339(Utc::now()),
    };

    let json = serde_json::to_string_pretty(&export)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize export: {}", e)))?;

    std::fs::write(path, json).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "Failed to write {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::info!(path = %path.display(), "Report exported");
    Ok(path.to_path_buf())
}
