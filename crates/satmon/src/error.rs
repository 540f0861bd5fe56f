//! Error types for saturdaymorning

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure here is fatal for the run.
#[derive(Error, Debug)]
pub enum SatmonError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{}:{line}: {message}", path.display())]
    ConfigSyntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("No schedule specified for: {}", .0.display())]
    NoSchedule(PathBuf),

    #[error("Unknown schedule: {0}")]
    UnknownSchedule(String),

    #[error("Unknown move subject '{0}' (expected 'siblings' or 'nephews')")]
    UnknownSubject(String),

    #[error("Source directory doesn't exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("Cannot move '{}' into itself ('{}')", from.display(), to.display())]
    MoveIntoSelf { from: PathBuf, to: PathBuf },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SatmonError>;
