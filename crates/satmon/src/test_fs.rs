//! In-memory [`Filesystem`] for unit tests.

use crate::error::{Result, SatmonError};
use crate::fs::{DirEntry, Filesystem};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Dir,
    File(String),
}

#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and its ancestors.
    pub fn dir(self, path: &str) -> Self {
        self.insert_dir(Path::new(path));
        self
    }

    /// Add a file, creating its ancestors.
    pub fn file(self, path: &str, contents: &str) -> Self {
        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            self.insert_dir(parent);
        }
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(contents.to_string()));
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.borrow().contains_key(Path::new(path))
    }

    fn insert_dir(&self, path: &Path) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }
}

impl Filesystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.borrow().get(path), Some(Node::Dir))
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let nodes = self.nodes.borrow();
        match nodes.get(dir) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(io::Error::new(io::ErrorKind::Other, "not a directory").into())
            }
            None => return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory").into()),
        }
        Ok(nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .filter_map(|(path, node)| {
                let name = path.file_name()?.to_str()?.to_string();
                Some(DirEntry::new(name, *node == Node::Dir))
            })
            .collect())
    }

    fn read_file(&self, path: &Path) -> Result<Option<String>> {
        match self.nodes.borrow().get(path) {
            Some(Node::File(contents)) => Ok(Some(contents.clone())),
            _ => Ok(None),
        }
    }

    fn relocate(&self, from: &Path, to: &Path) -> Result<()> {
        if self.exists(to) {
            return Err(SatmonError::DestinationExists(to.to_path_buf()));
        }
        if !self.exists(from) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such entry").into());
        }
        if let Some(parent) = to.parent() {
            self.insert_dir(parent);
        }

        let mut nodes = self.nodes.borrow_mut();
        let moved: Vec<PathBuf> = nodes
            .keys()
            .filter(|path| path.starts_with(from))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = nodes.remove(&old) {
                let rest = old.strip_prefix(from).unwrap_or(Path::new(""));
                let new = if rest.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(rest)
                };
                nodes.insert(new, node);
            }
        }
        Ok(())
    }

    fn remove_empty_dir(&self, dir: &Path) -> Result<bool> {
        let mut nodes = self.nodes.borrow_mut();
        match nodes.get(dir) {
            Some(Node::Dir) => {}
            _ => return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory").into()),
        }
        if nodes.keys().any(|path| path.parent() == Some(dir)) {
            return Ok(false);
        }
        nodes.remove(dir);
        Ok(true)
    }
}
