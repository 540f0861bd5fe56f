//! Logging setup for the `saturdaymorning` binary.
//!
//! Console output is message-only so that a cron mail or a terminal shows
//! lines like `Moving 'a' to 'b'...` verbatim. An optional daily log file
//! keeps a history of unattended runs.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "satmon=info,saturdaymorning=info";
const VERBOSE_LOG_FILTER: &str = "satmon=debug,saturdaymorning=debug";
const MAX_LOG_FILES: usize = 5;

/// Logging configuration for a single run.
#[derive(Debug, Clone)]
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// Send console output to stderr (stdout is reserved for JSON output).
    pub console_to_stderr: bool,
    /// Directory for the daily log file. No file is written when `None`.
    pub log_dir: Option<&'a Path>,
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

/// Install the global tracing subscriber.
///
/// When a log directory is configured the returned guard must be held until
/// exit; dropping it flushes the file writer.
pub fn init_logging(config: LogConfig<'_>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config.verbose)));

    let mut guard = None;
    let file_layer = match config.log_dir {
        Some(dir) => {
            let appender = file_appender(dir, config.app_name)?;
            let (writer, worker_guard) = tracing_appender::non_blocking(appender);
            guard = Some(worker_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(filter.clone()),
            )
        }
        None => None,
    };

    let console_writer = if config.console_to_stderr {
        tracing_subscriber::fmt::writer::BoxMakeWriter::new(io::stderr)
    } else {
        tracing_subscriber::fmt::writer::BoxMakeWriter::new(io::stdout)
    };
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(console_writer)
        .without_time()
        .with_target(false)
        .with_level(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// `<app_name>.<date>.log` under `dir`, rotated daily.
fn file_appender(dir: &Path, app_name: &str) -> Result<RollingFileAppender> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(app_name)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))
}
