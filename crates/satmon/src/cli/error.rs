//! Helpful error types for the command line
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use satmon::SatmonError;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Source root does not exist
    pub fn path_not_found(path: &Path) -> Self {
        Self::new(format!("Source directory doesn't exist: {}", path.display()))
            .with_context("The source library must exist before anything can be moved")
            .with_suggestions([
                format!("TRY: Check that the path exists: ls -la {}", path.display()),
                "TRY: Check for typos in the path".to_string(),
            ])
    }

    /// Source root is a file
    pub fn not_a_directory(path: &Path) -> Self {
        Self::new(format!("Not a directory: {}", path.display()))
            .with_context("The source must be the root directory of the library")
            .with_suggestion(format!(
                "TRY: Use the parent directory: {}",
                path.parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| ".".to_string())
            ))
    }

    /// `--date` could not be parsed
    pub fn invalid_date(value: &str) -> Self {
        Self::new(format!("Invalid date: '{}'", value))
            .with_context("The reference date is checked before anything is moved")
            .with_suggestions([
                "TRY: Use an absolute date: --date 2024/01/06".to_string(),
                "TRY: Use a day offset: --date +1 or --date -2".to_string(),
                "TRY: Use a shorthand: today, yesterday, tomorrow".to_string(),
            ])
    }

    /// Something is already where the candidate would go
    pub fn destination_exists(path: &Path) -> Self {
        Self::new(format!("Destination already exists: {}", path.display()))
            .with_context("Nothing is ever overwritten; the run stopped at this entry")
            .with_suggestions([
                format!("TRY: Inspect what is there: ls -la {}", path.display()),
                "TRY: Remove or rename the existing entry, then run again".to_string(),
            ])
    }

    /// Problem in a `.satmonrc`
    pub fn bad_config(err: &SatmonError) -> Self {
        Self::new(err.to_string())
            .with_context("A .satmonrc could not be applied")
            .with_suggestions([
                "TRY: Set 'schedule' to daily, weekday or a lower-case day name (monday..sunday)".to_string(),
                "TRY: Set 'move' to siblings or nephews".to_string(),
                "TRY: Run with --verbose to see which directory was being processed".to_string(),
            ])
    }
}

impl From<SatmonError> for HelpfulError {
    fn from(err: SatmonError) -> Self {
        match &err {
            SatmonError::SourceNotFound(path) => Self::path_not_found(path),
            SatmonError::NotADirectory(path) => Self::not_a_directory(path),
            SatmonError::InvalidDate(value) => Self::invalid_date(value),
            SatmonError::DestinationExists(path) => Self::destination_exists(path),
            SatmonError::ConfigSyntax { .. }
            | SatmonError::NoSchedule(_)
            | SatmonError::UnknownSchedule(_)
            | SatmonError::UnknownSubject(_) => Self::bad_config(&err),
            SatmonError::Io(_) | SatmonError::Walk(_) | SatmonError::MoveIntoSelf { .. } => {
                Self::new(err.to_string())
                    .with_suggestion("TRY: Check permissions on the source and destination trees")
            }
        }
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

#[derive(Serialize)]
struct JsonError<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a str>,
    suggestions: &'a [String],
}

/// Print an error as a JSON object on stdout.
pub fn print_json_error(err: &anyhow::Error) {
    let message = err.to_string();
    let payload = match err.downcast_ref::<HelpfulError>() {
        Some(helpful) => JsonError {
            error: &helpful.message,
            context: helpful.context.as_deref(),
            suggestions: &helpful.suggestions,
        },
        None => JsonError {
            error: &message,
            context: None,
            suggestions: &[],
        },
    };
    match serde_json::to_string_pretty(&payload) {
        Ok(json) => println!("{}", json),
        Err(_) => eprintln!("{:?}", err),
    }
}
