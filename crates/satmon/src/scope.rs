//! Resolving a configuration scope into the one candidate it may move today.

use crate::config::{EffectiveOptions, ScopeConfig, Subject, CONF_NAME};
use crate::entries::{first_entry, ordered_dir_entries};
use crate::error::Result;
use crate::fs::Filesystem;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A directory governed by a `.satmonrc`, with its mirrored destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Scope {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// The entry picked for possible relocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Everything the scheduler and executor need for one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub subject: Subject,
    /// Selected subject directory, for `nephews` only.
    pub subject_dir: Option<String>,
    pub options: EffectiveOptions,
    pub candidate: Candidate,
}

/// Read and parse the scope's marker file. `None` when there is no marker.
pub fn load_config<F: Filesystem + ?Sized>(fs: &F, dir: &Path) -> Result<Option<ScopeConfig>> {
    let path = dir.join(CONF_NAME);
    match fs.read_file(&path)? {
        Some(text) => Ok(Some(ScopeConfig::parse(&text, &path)?)),
        None => Ok(None),
    }
}

/// Pick the candidate for `scope`, or `None` when there is nothing to move.
pub fn resolve<F: Filesystem + ?Sized>(
    fs: &F,
    scope: &Scope,
    config: &ScopeConfig,
) -> Result<Option<Resolution>> {
    let base = config.base_options();
    let subject = base.subject()?;

    match subject {
        Subject::Siblings => resolve_siblings(fs, scope, base),
        Subject::Nephews => resolve_nephews(fs, scope, config, base),
    }
}

fn resolve_siblings<F: Filesystem + ?Sized>(
    fs: &F,
    scope: &Scope,
    options: EffectiveOptions,
) -> Result<Option<Resolution>> {
    let Some(first) = ordered_dir_entries(fs, &scope.source)?.into_iter().next() else {
        debug!("Directory '{}' is empty... skipping.", scope.source.display());
        return Ok(None);
    };
    debug!("Inspecting '{}'...", first.name);

    Ok(Some(Resolution {
        subject: Subject::Siblings,
        subject_dir: None,
        options,
        candidate: Candidate {
            source: scope.source.join(&first.name),
            destination: scope.destination.join(&first.name),
            name: first.name,
        },
    }))
}

fn resolve_nephews<F: Filesystem + ?Sized>(
    fs: &F,
    scope: &Scope,
    config: &ScopeConfig,
    base: EffectiveOptions,
) -> Result<Option<Resolution>> {
    for entry in ordered_dir_entries(fs, &scope.source)? {
        let subject_src = scope.source.join(&entry.name);
        if !entry.is_dir {
            debug!("'{}' is not a directory... skipping.", subject_src.display());
            continue;
        }
        debug!("Inspecting '{}'...", entry.name);

        let Some(child) = first_entry(fs, &subject_src)? else {
            debug!("Directory '{}' is empty... skipping.", subject_src.display());
            continue;
        };

        let subject_dst = scope.destination.join(&entry.name);
        let options = config.options_for_subject(&base, &entry.name);
        return Ok(Some(Resolution {
            subject: Subject::Nephews,
            candidate: Candidate {
                source: subject_src.join(&child),
                destination: subject_dst.join(&child),
                name: child,
            },
            subject_dir: Some(entry.name),
            options,
        }));
    }

    debug!(
        "Nothing left to move under '{}'... skipping.",
        scope.source.display()
    );
    Ok(None)
}
