// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout retrieval and enrichment stages.
//!
//! Both stages pass values: the fetcher returns an ordered list, the
//! enricher takes and returns one. The detail loop is strictly
//! sequential with a fixed pause between requests to bound load on the
//! per-workout endpoint.

use std::cmp::Reverse;
use std::time::Duration;

use crate::error::AppError;
use crate::models::performance::{EnrichedWorkout, Enrichment};
use crate::models::workout::RawWorkout;
use crate::services::peloton::{PelotonClient, Session};

/// Sample stride for performance graphs; one point per workout suffices.
pub const DETAIL_EVERY_N: u32 = 1000;

/// Pause between consecutive detail requests.
pub const DETAIL_REQUEST_DELAY: Duration = Duration::from_millis(200);

/// Fetch one page of workouts, filtered to cycling, newest first.
///
/// The upstream contract is a single page of up to `limit` items; older
/// workouts beyond that page are unreachable.
pub async fn fetch_cycling_workouts(
    client: &PelotonClient,
    session: &Session,
    limit: u32,
) -> Result<Vec<RawWorkout>, AppError> {
    let page = client.list_workouts(session, limit, 0).await?;
    let workouts = filter_and_sort(page.data);

    tracing::info!(count = workouts.len(), "Fetched cycling workouts");
    Ok(workouts)
}

/// Filter to the cycling discipline and order by creation timestamp,
/// descending. The sort is stable: upstream order is preserved for
/// equal timestamps. Filtering happens here exactly once.
pub fn filter_and_sort(workouts: Vec<RawWorkout>) -> Vec<RawWorkout> {
    let mut cycling: Vec<RawWorkout> = workouts
        .into_iter()
        .filter(RawWorkout::is_cycling)
        .collect();

    // Workouts without a creation timestamp sort last
    cycling.sort_by_key(|w| Reverse(w.created_at.unwrap_or(i64::MIN)));
    cycling
}

/// Attach performance detail to the first `max_details` workouts.
///
/// One in-flight detail request at a time, with `DETAIL_REQUEST_DELAY`
/// between consecutive requests (skipped after the final one). A failed
/// fetch is logged and leaves that workout un-enriched; it never aborts
/// the remaining items.
pub async fn enrich_workouts(
    client: &PelotonClient,
    session: &Session,
    workouts: Vec<RawWorkout>,
    max_details: usize,
) -> Vec<EnrichedWorkout> {
    let detail_count = workouts.len().min(max_details);
    tracing::info!(detail_count, total = workouts.len(), "Enriching workouts");

    let mut enriched = Vec::with_capacity(workouts.len());
    for (index, workout) in workouts.into_iter().enumerate() {
        if index >= detail_count {
            enriched.push(EnrichedWorkout::bare(workout));
            continue;
        }

        let enrichment = match client
            .performance_graph(session, &workout.id, DETAIL_EVERY_N)
            .await
        {
            Ok(graph) => Some(Enrichment::from_graph(&graph)),
            Err(e) => {
                let err = AppError::DetailFetch {
                    workout_id: workout.id.clone(),
                    reason: e.to_string(),
                };
                tracing::warn!(workout_id = %workout.id, error = %err, "Skipping enrichment");
                None
            }
        };

        enriched.push(EnrichedWorkout {
            workout,
            enrichment,
        });

        if index + 1 < detail_count {
            tokio::time::sleep(DETAIL_REQUEST_DELAY).await;
        }
    }

    enriched
}
