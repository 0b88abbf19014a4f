//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use jobharvest_core::ExperienceLevel;

/// Scrape LinkedIn guest job-search listings to CSV/JSON.
///
/// Queries the public guest endpoint page by page, extracts job cards,
/// removes near-duplicates, and writes the results to a timestamped file.
/// Missing inputs are prompted for interactively.
#[derive(Parser, Debug)]
#[command(name = "jobharvest")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Job title or keywords to search for (prompted when omitted)
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Location to search in (prompted when omitted)
    #[arg(short, long)]
    pub location: Option<String>,

    /// Number of jobs to collect (prompted when omitted)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Experience level filter: internship, entry-level, associate,
    /// mid-senior, director, executive (all levels when omitted)
    #[arg(short, long, value_parser = clap::value_parser!(ExperienceLevel))]
    pub experience: Option<ExperienceLevel>,

    /// Also export results as JSON alongside the CSV
    #[arg(long)]
    pub json: bool,

    /// Skip the start confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Path to the configuration file
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,
}
