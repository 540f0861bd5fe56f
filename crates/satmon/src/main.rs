//! saturdaymorning
//!
//! Moves one episode per show from a staging library into the library that
//! is actually watched, on a schedule set per show in a `.satmonrc`. Meant to
//! be run once a day from cron.

use clap::Parser;
use satmon_logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "saturdaymorning",
    version,
    about = "Release one episode at a time from SOURCE into DESTINATION"
)]
struct Cli {
    /// Root of the staging library
    source: PathBuf,

    /// Root of the library to release into
    destination: PathBuf,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Report what would be moved without moving anything
    #[arg(long)]
    dry_run: bool,

    /// Pretend today is this date (YYYY/MM/DD, +N/-N days, today, yesterday, tomorrow)
    #[arg(long, allow_hyphen_values = true)]
    date: Option<String>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Also write a rotating log file to this directory
    #[arg(long, env = "SATMON_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.as_deref().map(cli::run::expand_path);
    let _log_guard = match init_logging(LogConfig {
        app_name: "saturdaymorning",
        verbose: cli.verbose,
        console_to_stderr: cli.json,
        log_dir: log_dir.as_deref(),
    }) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    let json_mode = cli.json;
    let result = cli::run::run(cli::run::RunArgs {
        source: cli.source,
        destination: cli.destination,
        dry_run: cli.dry_run,
        date: cli.date,
        json: cli.json,
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json_mode {
                cli::error::print_json_error(&err);
            } else {
                eprintln!("{}", err);
            }
            ExitCode::from(1)
        }
    }
}
