// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Peloton report pipeline
//!
//! Authenticates with the Peloton API, fetches cycling workouts,
//! enriches recent ones with performance detail, and exports a
//! normalized report with summary statistics.

use peloton_tracker::config::{Config, Credentials};
use peloton_tracker::models::report::{ReportRecord, SummaryStats};
use peloton_tracker::services::workouts::{enrich_workouts, fetch_cycling_workouts};
use peloton_tracker::services::{export, normalize, PelotonClient};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Credentials are checked before any network call is attempted
    let credentials = Credentials::from_env().map_err(|e| {
        anyhow::anyhow!(
            "{}. Set PELOTON_USERNAME and PELOTON_PASSWORD in the environment or a .env file.",
            e
        )
    })?;
    let config = Config::from_env()?;

    let client = PelotonClient::new(config.api_base_url.clone());

    tracing::info!("Authenticating with Peloton");
    let session = client
        .authenticate(&credentials.username, &credentials.password)
        .await?;
    tracing::info!(user_id = %session.user_id, "Authenticated");

    let workouts = fetch_cycling_workouts(&client, &session, config.workout_limit).await?;
    if workouts.is_empty() {
        println!("No cycling workouts found");
        return Ok(());
    }

    let enriched = enrich_workouts(&client, &session, workouts, config.detail_limit).await;

    let records: Vec<ReportRecord> = enriched.iter().map(normalize::normalize).collect();
    let summary = SummaryStats::from_workouts(&enriched);

    print_summary(&summary, &records);

    let path = export::save_report(
        Path::new(&config.export_path),
        summary,
        records,
        enriched,
    )?;
    println!("\nComplete! Cycling data exported to {}", path.display());

    Ok(())
}

/// Console report: summary totals plus the ten most recent workouts.
fn print_summary(summary: &SummaryStats, records: &[ReportRecord]) {
    println!("\nPELOTON CYCLING SUMMARY");
    println!("{}", "=".repeat(50));
    println!("Total workouts: {}", summary.total_workouts);
    println!("Total distance: {} miles", summary.total_distance);
    println!("Total calories: {}", summary.total_calories);
    println!(
        "Detailed metrics available for {} recent workouts",
        summary.performance_data_count
    );

    println!("\nRECENT WORKOUTS");
    println!("{}", "=".repeat(50));

    for (index, record) in records.iter().take(10).enumerate() {
        println!("{}. {}", index + 1, record.class_name);
        println!(
            "   {} | {} min | {}",
            record.instructor_name, record.duration, record.date
        );
        println!(
            "   {:.1} kJ | {} cal | {} mi",
            record.total_output, record.calories, record.distance
        );
        if record.has_detailed_metrics {
            let fmt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
            println!(
                "   {} rpm | {}% | {} mph",
                fmt(record.avg_cadence),
                fmt(record.avg_resistance),
                fmt(record.avg_speed)
            );
        }
        println!();
    }
}

/// Initialize compact console logging for the pipeline.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false).compact();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("peloton_tracker=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .with(format)
        .init();
}
