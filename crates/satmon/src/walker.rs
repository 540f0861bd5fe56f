//! Depth-first traversal of the source library.
//!
//! Each directory is either a scope (it holds a `.satmonrc`) or a plain
//! directory whose subdirectories (hidden ones too) are visited in turn, with
//! the destination path mirrored one level deeper. Nothing below a scope is
//! ever visited.

use crate::config::ScopeConfig;
use crate::entries::subdirectories;
use crate::error::{Result, SatmonError};
use crate::executor::MoveExecutor;
use crate::fs::{prune_empty_parents, Filesystem, LocalFs};
use crate::report::{RunReport, ScopeAction, ScopeReport};
use crate::schedule::evaluate;
use crate::scope::{load_config, resolve, Scope};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, info};

/// Settings fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub reference_date: NaiveDate,
    pub dry_run: bool,
}

/// Outcome of visiting one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOutcome {
    /// The directory was a scope and was processed.
    Scope(ScopeAction),
    /// No marker; this many subdirectories were visited.
    Recursed { children: usize },
}

pub struct Walker<'a, F: Filesystem + ?Sized> {
    fs: &'a F,
    reference_date: NaiveDate,
    executor: MoveExecutor,
}

impl<'a, F: Filesystem + ?Sized> Walker<'a, F> {
    pub fn new(fs: &'a F, options: RunOptions) -> Self {
        Self {
            fs,
            reference_date: options.reference_date,
            executor: MoveExecutor::new(options.dry_run),
        }
    }

    /// Walk `source`, mirroring moves into `destination`.
    pub fn run(mut self, source: &Path, destination: &Path) -> Result<RunReport> {
        if !self.fs.exists(source) {
            return Err(SatmonError::SourceNotFound(source.to_path_buf()));
        }
        if !self.fs.is_dir(source) {
            return Err(SatmonError::NotADirectory(source.to_path_buf()));
        }

        let mut report = RunReport::new(self.reference_date, self.executor.dry_run());
        self.visit(source, destination, &mut report)?;
        report.moved = self.executor.moved();

        if !report.moved {
            info!("Nothing to do.");
        }
        Ok(report)
    }

    /// Visit one directory.
    pub fn visit(&mut self, src: &Path, dst: &Path, report: &mut RunReport) -> Result<NodeOutcome> {
        if let Some(config) = load_config(self.fs, src)? {
            debug!("Found config in: {}", src.display());
            let scope = Scope::new(src, dst);
            let action = self.process_scope(&scope, &config, report)?;
            return Ok(NodeOutcome::Scope(action));
        }

        debug!("Recursing into: {}", src.display());
        let children = subdirectories(self.fs, src)?;
        for name in &children {
            self.visit(&src.join(name), &dst.join(name), report)?;
        }
        Ok(NodeOutcome::Recursed {
            children: children.len(),
        })
    }

    fn process_scope(
        &mut self,
        scope: &Scope,
        config: &ScopeConfig,
        report: &mut RunReport,
    ) -> Result<ScopeAction> {
        let Some(resolution) = resolve(self.fs, scope, config)? else {
            report.record(ScopeReport {
                scope: scope.source.clone(),
                subject: config.base_options().subject()?,
                action: ScopeAction::Empty,
                source: None,
                destination: None,
                reason: None,
            });
            return Ok(ScopeAction::Empty);
        };

        let decision = evaluate(&resolution.options, self.reference_date, &resolution.candidate.source)?;
        let action: ScopeAction = self
            .executor
            .execute(self.fs, &resolution.candidate, &decision)?
            .into();
        if action == ScopeAction::Moved {
            prune_empty_parents(self.fs, &resolution.candidate.source, &scope.source);
        }

        report.record(ScopeReport {
            scope: scope.source.clone(),
            subject: resolution.subject,
            action,
            source: Some(resolution.candidate.source),
            destination: Some(resolution.candidate.destination),
            reason: Some(decision.reason().to_string()),
        });
        Ok(action)
    }
}

/// Run against the local disk.
pub fn run(source: &Path, destination: &Path, options: RunOptions) -> Result<RunReport> {
    Walker::new(&LocalFs, options).run(source, destination)
}
