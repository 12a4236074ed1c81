use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;

use placegrid_core::boundary::load_boundary;
use placegrid_core::coverage::planner;
use placegrid_core::dedup::ResultDeduplicator;
use placegrid_core::metrics::RunMetrics;
use placegrid_core::ports::{PlaceSearch, RecordSink};
use placegrid_export::CsvSink;
use placegrid_places::PlacesClient;

use crate::cli::ScrapeArgs;
use crate::config::{load_config, planner_overrides};
use crate::output::OutputWriter;
use crate::progress::{create_progress_bar, finish_success};

pub async fn execute(
    args: ScrapeArgs,
    config_path: Option<&Path>,
    output: &OutputWriter,
) -> Result<()> {
    let config = load_config(
        config_path,
        planner_overrides(
            &args.categories,
            args.radius_m,
            args.overlap_factor,
            args.circle_vertices,
            args.no_gap_fill,
            args.max_gap_passes,
        ),
    )?;
    let planner_config = config.planner_config()?;
    let profiles = config.profiles.value.clone();

    let boundary = load_boundary(&args.boundary)?;
    let mut metrics = RunMetrics::new();
    let plan = planner::plan(&boundary, &profiles, &planner_config, &mut metrics)?;
    output.info(format!(
        "Planned {} search points across {} profile(s)",
        plan.points.len(),
        plan.profiles.len()
    ));

    let client = PlacesClient::with_base_url(
        &args.api_key,
        config.request_timeout_secs.value,
        &args.base_url,
    )?
    .with_retry_policy(config.max_retries.value, 1_000);

    let mut sink = CsvSink::create(&args.output)?;
    let mut dedup = ResultDeduplicator::new(&boundary);

    // Ctrl-C requests cancellation; it takes effect between queries, so the
    // records merged so far stay valid and already sit in the output file.
    let cancelled = Arc::new(AtomicBool::new(false));
    {
        let cancelled = Arc::clone(&cancelled);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancelled.store(true, Ordering::SeqCst);
            }
        });
    }

    let progress = create_progress_bar(plan.points.len() as u64, "Querying search points...");
    for point in &plan.points {
        if cancelled.load(Ordering::SeqCst) {
            progress.abandon();
            output.warning("Cancelled; keeping everything merged so far");
            break;
        }

        metrics.queries_issued += 1;
        let batch = match client
            .search(point.coordinate, point.profile.radius_m, &point.profile.category)
            .await
        {
            Ok(batch) => batch,
            Err(e) => {
                // Recovered locally: a failed point contributes zero results
                metrics.query_failures += 1;
                tracing::warn!(
                    lat = point.coordinate.lat,
                    lon = point.coordinate.lon,
                    category = %point.profile.category,
                    error = %e,
                    "query failed; continuing with zero results"
                );
                Vec::new()
            }
        };

        let fresh = dedup.merge(batch, &mut metrics);
        if !fresh.is_empty() {
            sink.write(&fresh)?;
        }
        progress.inc(1);
    }

    if !cancelled.load(Ordering::SeqCst) {
        finish_success(&progress, "queries complete");
    }

    if output.is_json() {
        output.payload(&serde_json::to_value(&metrics)?);
    } else {
        output.info(format!(
            "{} queries issued, {} failed",
            metrics.queries_issued, metrics.query_failures
        ));
        output.info(format!(
            "{} records seen: {} merged, {} duplicates, {} missing coordinates, {} outside boundary",
            metrics.records_seen,
            metrics.records_merged,
            metrics.duplicates_dropped,
            metrics.missing_coordinate,
            metrics.outside_boundary
        ));
        output.success(format!(
            "Wrote {} unique places to {}",
            metrics.records_merged,
            args.output.display()
        ));
    }

    Ok(())
}
