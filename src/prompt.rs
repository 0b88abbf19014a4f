//! Interactive prompts for search inputs not supplied on the command line.

use std::time::Duration;

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Select};

use jobharvest_core::{AppConfig, ExperienceLevel, SearchRequest, validate_job_count};

use crate::cli::Args;

/// Rough per-page overhead beyond the configured throttle (request + parse).
const PAGE_OVERHEAD_SECS: f64 = 2.0;

/// Builds the search request, prompting for anything the CLI left out.
pub fn build_request(args: &Args, config: &AppConfig) -> Result<SearchRequest> {
    let keyword = match &args.keyword {
        Some(keyword) => keyword.clone(),
        None => prompt_keyword()?,
    };

    let location = match &args.location {
        Some(location) => location.clone(),
        None => Input::new()
            .with_prompt("Location")
            .default(config.default_location.clone())
            .interact_text()
            .context("failed to read location")?,
    };

    let desired_count = match args.count {
        Some(count) => {
            validate_job_count(&count.to_string(), config.default_num_jobs, config.max_jobs_limit)
                .with_context(|| format!("invalid --count {count}"))?
        }
        None => prompt_count(config)?,
    };

    let experience = match args.experience {
        Some(level) => Some(level),
        None => prompt_experience()?,
    };

    Ok(SearchRequest {
        keyword,
        location,
        desired_count,
        experience,
    })
}

fn prompt_keyword() -> Result<String> {
    loop {
        let input: String = Input::new()
            .with_prompt("Job title / keywords")
            .allow_empty(true)
            .interact_text()
            .context("failed to read job title")?;
        let trimmed = input.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        eprintln!("Job title cannot be empty.");
    }
}

fn prompt_count(config: &AppConfig) -> Result<usize> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!(
                "Number of jobs (1-{}, default {})",
                config.max_jobs_limit, config.default_num_jobs
            ))
            .allow_empty(true)
            .interact_text()
            .context("failed to read job count")?;
        match validate_job_count(&input, config.default_num_jobs, config.max_jobs_limit) {
            Ok(count) => return Ok(count),
            Err(error) => eprintln!("{error}"),
        }
    }
}

fn prompt_experience() -> Result<Option<ExperienceLevel>> {
    let mut items = vec!["All levels".to_string()];
    items.extend(ExperienceLevel::ALL.iter().map(|l| l.label().to_string()));

    let choice = Select::new()
        .with_prompt("Experience level")
        .items(&items)
        .default(0)
        .interact()
        .context("failed to read experience level")?;

    Ok(if choice == 0 {
        None
    } else {
        Some(ExperienceLevel::ALL[choice - 1])
    })
}

/// Asks whether a JSON copy should be written alongside the CSV.
pub fn prompt_json_export(config: &AppConfig) -> Result<bool> {
    Confirm::new()
        .with_prompt("Also export as JSON?")
        .default(config.export_json)
        .interact()
        .context("failed to read JSON choice")
}

/// Confirms the run after showing the time estimate.
pub fn confirm_start(request: &SearchRequest, config: &AppConfig) -> Result<bool> {
    let estimate = estimate_time(request.desired_count, config.delay_between_requests);
    println!(
        "About to collect up to {} jobs for \"{}\" in {} (estimated {}).",
        request.desired_count,
        request.keyword,
        request.location,
        format_estimate(estimate)
    );
    Confirm::new()
        .with_prompt("Start scraping?")
        .default(true)
        .interact()
        .context("failed to read confirmation")
}

/// Rough duration estimate: one throttled request per page of 25.
pub fn estimate_time(num_jobs: usize, delay_secs: f64) -> Duration {
    let pages = num_jobs.div_ceil(25);
    let per_page = delay_secs.max(0.0) + PAGE_OVERHEAD_SECS;
    Duration::from_secs_f64(pages as f64 * per_page)
}

fn format_estimate(duration: Duration) -> String {
    let total = duration.as_secs();
    if total >= 60 {
        format!("{} min {} sec", total / 60, total % 60)
    } else {
        format!("{total} sec")
    }
}
