//! CLI entry point for the job scraper.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use jobharvest_core::{
    AppConfig, NullProgress, PageFetcher, ProgressSink, RunLog, RunSummary, StopReason, collect,
    dedupe, export_csv, export_json, output_filename, resolve_output_dir,
};
use tracing::{debug, info, warn};

mod cli;
mod progress;
mod prompt;

use cli::Args;
use progress::BarProgress;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let config = AppConfig::load(&args.config);
    let output_dir = resolve_output_dir(&config);
    let run_log = RunLog::new(&output_dir, config.log_to_file);

    let request = prompt::build_request(&args, &config)?;
    let want_json = if args.json {
        true
    } else if args.yes {
        config.export_json
    } else {
        prompt::prompt_json_export(&config)?
    };

    if !args.yes && !prompt::confirm_start(&request, &config)? {
        info!("Cancelled.");
        return Ok(());
    }

    run_log.info(&format!(
        "Search started: \"{}\" in {} (target {})",
        request.keyword, request.location, request.desired_count
    ));

    let fetcher = PageFetcher::new(&config);
    let bar = (config.show_progress_bar && !args.quiet).then(|| BarProgress::new(request.desired_count));
    let sink: &dyn ProgressSink = match &bar {
        Some(bar) => bar,
        None => &NullProgress,
    };

    let started = Instant::now();
    let (records, stats) = collect(&request, &fetcher, sink).await;
    if let Some(bar) = &bar {
        bar.finish();
    }

    match stats.stop {
        StopReason::TargetReached => {
            run_log.info(&format!("Target reached: {} jobs", records.len()));
        }
        StopReason::NoMoreResults => {
            info!(collected = records.len(), "No more results on the site");
            run_log.info(&format!("Results exhausted after {} jobs", records.len()));
        }
        StopReason::FetchFailed => {
            warn!(collected = records.len(), "A page fetch failed; keeping partial results");
            run_log.warning(&format!(
                "Fetch failed after {} pages; kept {} jobs",
                stats.pages_fetched,
                records.len()
            ));
        }
        StopReason::Blocked => {
            warn!(
                collected = records.len(),
                "Blocked by the server; keeping partial results. Try again later or raise delay_between_requests."
            );
            run_log.error(&format!("Blocked after {} pages; kept {} jobs", stats.pages_fetched, records.len()));
        }
    }
    if stats.fragments_skipped > 0 {
        debug!(skipped = stats.fragments_skipped, "fragments without a listing anchor skipped");
    }

    let (records, duplicates_removed) = dedupe(records);

    if records.is_empty() {
        warn!("No jobs collected; nothing to export");
        run_log.warning("No jobs collected; nothing to export");
        return Ok(());
    }

    println!("\nSample of collected jobs:");
    for record in records.iter().take(5) {
        println!("  {} - {} ({})", record.title, record.company, record.location);
    }
    if records.len() > 5 {
        println!("  ... and {} more", records.len() - 5);
    }

    let csv_path = output_dir.join(output_filename(&request.keyword, &request.location, "csv"));
    export_csv(&records, &csv_path)
        .with_context(|| format!("CSV export failed for {}", csv_path.display()))?;
    println!("\nSaved CSV: {}", csv_path.display());
    run_log.info(&format!("CSV written: {}", csv_path.display()));

    if want_json {
        let json_path =
            output_dir.join(output_filename(&request.keyword, &request.location, "json"));
        export_json(&records, &json_path)
            .with_context(|| format!("JSON export failed for {}", json_path.display()))?;
        println!("Saved JSON: {}", json_path.display());
        run_log.info(&format!("JSON written: {}", json_path.display()));
    }

    let summary = RunSummary {
        jobs: records.len(),
        duplicates_removed,
        elapsed: started.elapsed(),
    };
    println!("\n{summary}");
    run_log.info(&summary.to_string());
    if let Some(path) = run_log.path() {
        debug!(log = %path.display(), "run log written");
    }

    Ok(())
}
