//! Filesystem access used by the traversal.
//!
//! The walk only needs a handful of operations, so they sit behind the
//! [`Filesystem`] trait. [`LocalFs`] is the real implementation; tests drive
//! the same engine over an in-memory tree.

use crate::error::{Result, SatmonError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }
}

/// Pluggable filesystem for the traversal engine.
pub trait Filesystem {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory (symlinks followed).
    fn is_dir(&self, path: &Path) -> bool;

    /// Immediate children of `dir`, in no particular order.
    fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntry>>;

    /// Contents of `path` when it is a regular file, `None` otherwise.
    fn read_file(&self, path: &Path) -> Result<Option<String>>;

    /// Move the file or tree at `from` to `to`, creating the parents of `to`.
    /// Fails when `to` already exists.
    fn relocate(&self, from: &Path, to: &Path) -> Result<()>;

    /// Remove `dir` if it has no entries at all. Returns whether it was removed.
    fn remove_empty_dir(&self, dir: &Path) -> Result<bool>;
}

/// Remove the directories between `moved_from` and `stop_at` that a move left
/// empty, innermost first. `stop_at` itself is kept.
///
/// Best effort: the walk stops at the first directory that still has entries
/// or cannot be removed.
pub fn prune_empty_parents<F: Filesystem + ?Sized>(
    fs: &F,
    moved_from: &Path,
    stop_at: &Path,
) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    for dir in moved_from.ancestors().skip(1) {
        if dir == stop_at || !dir.starts_with(stop_at) {
            break;
        }
        match fs.remove_empty_dir(dir) {
            Ok(true) => {
                debug!("Removed empty directory '{}'", dir.display());
                removed.push(dir.to_path_buf());
            }
            Ok(false) => break,
            Err(err) => {
                warn!("Could not remove empty directory '{}': {}", dir.display(), err);
                break;
            }
        }
    }
    removed
}

/// The local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!(
                        "Skipping entry with a non UTF-8 name in '{}': {:?}",
                        dir.display(),
                        raw
                    );
                    continue;
                }
            };
            let is_dir = entry.path().is_dir();
            entries.push(DirEntry { name, is_dir });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<Option<String>> {
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn relocate(&self, from: &Path, to: &Path) -> Result<()> {
        if self.exists(to) {
            return Err(SatmonError::DestinationExists(to.to_path_buf()));
        }
        if from.is_dir() && to.starts_with(from) {
            return Err(SatmonError::MoveIntoSelf {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            });
        }
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }

        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err) if is_cross_device(&err) => {
                debug!(
                    "'{}' and '{}' are on different devices, copying instead",
                    from.display(),
                    to.display()
                );
                move_by_copy(from, to)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn remove_empty_dir(&self, dir: &Path) -> Result<bool> {
        if fs::read_dir(dir)?.next().is_some() {
            return Ok(false);
        }
        fs::remove_dir(dir)?;
        Ok(true)
    }
}

/// Copy `from` to `to`, then delete `from`. A failed copy leaves nothing
/// behind at `to`.
fn move_by_copy(from: &Path, to: &Path) -> Result<()> {
    if let Err(err) = copy_tree(from, to) {
        remove_path(to);
        return Err(err);
    }
    if from.is_dir() {
        fs::remove_dir_all(from)?;
    } else {
        fs::remove_file(from)?;
    }
    Ok(())
}

fn remove_path(path: &Path) {
    let result = match path.symlink_metadata() {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(_) => return,
    };
    if let Err(err) = result {
        warn!("Could not clean up partial copy '{}': {}", path.display(), err);
    }
}

#[cfg(unix)]
fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

// ERROR_NOT_SAME_DEVICE
#[cfg(windows)]
fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_err: &io::Error) -> bool {
    false
}

/// Copy a file or directory tree, keeping symlinks as symlinks.
fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = if relative.as_os_str().is_empty() {
            to.to_path_buf()
        } else {
            to.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let points_to = fs::read_link(link)?;
    std::os::unix::fs::symlink(points_to, target)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    fs::copy(link, target)?;
    Ok(())
}
