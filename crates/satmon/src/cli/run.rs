//! The one command: walk the library and release what is due today.

use crate::cli::error::HelpfulError;
use satmon::date::{parse_reference_date, today};
use satmon::{RunOptions, RunReport};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Arguments for a run
#[derive(Debug)]
pub struct RunArgs {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub dry_run: bool,
    pub date: Option<String>,
    pub json: bool,
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: &Path) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(path));
        }
    }
    path.to_path_buf()
}

/// Execute a run
pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let reference_date = match args.date.as_deref() {
        Some(value) => parse_reference_date(value, today()).map_err(HelpfulError::from)?,
        None => today(),
    };
    debug!("Reference date: {} ({})", reference_date, reference_date.format("%A"));

    let source = expand_path(&args.source);
    let destination = expand_path(&args.destination);
    let options = RunOptions {
        reference_date,
        dry_run: args.dry_run,
    };

    let report = satmon::run(&source, &destination, options).map_err(HelpfulError::from)?;
    print_report(&report, args.json)
}

fn print_report(report: &RunReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else if report.moved {
        // "Nothing to do." is already logged by the walk itself.
        println!("{}", report.summary());
    }
    Ok(())
}
