//! Picking entries out of a directory.
//!
//! Hidden entries (names starting with `.`) are never candidates, which also
//! keeps the `.satmonrc` marker out of every candidate listing. Traversal
//! still descends into hidden directories.

use crate::error::Result;
use crate::fs::{DirEntry, Filesystem};
use crate::order::{sort_key, sort_natural};
use std::path::Path;

const HIDDEN_PREFIX: char = '.';

pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_PREFIX)
}

fn visible_entries<F: Filesystem + ?Sized>(fs: &F, dir: &Path) -> Result<Vec<DirEntry>> {
    let mut entries = fs.list_dir(dir)?;
    entries.retain(|entry| !is_hidden(&entry.name));
    Ok(entries)
}

/// First visible entry of `dir` by raw name, if any.
pub fn first_entry<F: Filesystem + ?Sized>(fs: &F, dir: &Path) -> Result<Option<String>> {
    Ok(visible_entries(fs, dir)?
        .into_iter()
        .map(|entry| entry.name)
        .min())
}

/// Visible entries of `dir` in natural order.
pub fn ordered_dir_entries<F: Filesystem + ?Sized>(fs: &F, dir: &Path) -> Result<Vec<DirEntry>> {
    let mut entries = visible_entries(fs, dir)?;
    entries.sort_by_cached_key(|entry| (sort_key(&entry.name), entry.name.clone()));
    Ok(entries)
}

/// Names of the visible entries of `dir` in natural order.
pub fn ordered_entries<F: Filesystem + ?Sized>(fs: &F, dir: &Path) -> Result<Vec<String>> {
    Ok(ordered_dir_entries(fs, dir)?
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}

/// Every subdirectory of `dir`, hidden ones included, in natural order.
pub fn subdirectories<F: Filesystem + ?Sized>(fs: &F, dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = fs
        .list_dir(dir)?
        .into_iter()
        .filter(|entry| entry.is_dir)
        .map(|entry| entry.name)
        .collect();
    sort_natural(&mut names);
    Ok(names)
}
