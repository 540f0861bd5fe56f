//! What a run did, scope by scope.

use crate::config::Subject;
use crate::executor::MoveAction;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one configuration scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeAction {
    Moved,
    WouldMove,
    Skipped,
    /// No candidate left in the scope.
    Empty,
}

impl From<MoveAction> for ScopeAction {
    fn from(action: MoveAction) -> Self {
        match action {
            MoveAction::Moved => ScopeAction::Moved,
            MoveAction::WouldMove => ScopeAction::WouldMove,
            MoveAction::Skipped => ScopeAction::Skipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeReport {
    pub scope: PathBuf,
    pub subject: Subject,
    pub action: ScopeAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub reference_date: NaiveDate,
    pub dry_run: bool,
    pub scopes: Vec<ScopeReport>,
    /// Whether any scope moved (or would have moved) something.
    pub moved: bool,
}

impl RunReport {
    pub fn new(reference_date: NaiveDate, dry_run: bool) -> Self {
        Self {
            reference_date,
            dry_run,
            scopes: Vec::new(),
            moved: false,
        }
    }

    pub fn record(&mut self, scope: ScopeReport) {
        self.scopes.push(scope);
    }

    pub fn count(&self, action: ScopeAction) -> usize {
        self.scopes.iter().filter(|s| s.action == action).count()
    }

    /// One-line summary for the console.
    pub fn summary(&self) -> String {
        if !self.moved {
            return "Nothing to do.".to_string();
        }
        let (count, verb) = if self.dry_run {
            (self.count(ScopeAction::WouldMove), "would be moved")
        } else {
            (self.count(ScopeAction::Moved), "moved")
        };
        format!(
            "{} item{} {} ({} scope{} checked).",
            count,
            if count == 1 { "" } else { "s" },
            verb,
            self.scopes.len(),
            if self.scopes.len() == 1 { "" } else { "s" }
        )
    }
}
