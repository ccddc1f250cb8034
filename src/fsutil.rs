//! Read-only access to a cgroup2 hierarchy.
//!
//! The collection engine never touches `std::fs` directly. Everything goes through
//! [`CgroupFs`], whose paths are slash-separated and relative to the hierarchy root,
//! with `.` naming the root itself. [`DirFs`] is the production implementation.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

/// Name of the hierarchy root in [`CgroupFs`] paths.
pub const ROOT: &str = ".";

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Filesystem operations needed to walk a cgroup hierarchy.
///
/// Implementations must be safe to share between concurrent collection passes.
pub trait CgroupFs: Send + Sync {
    /// Lists the entries of the directory at `path`.
    ///
    /// Entries should be returned in a stable order; [`DirFs`] sorts them by name.
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>>;

    /// Opens the file at `path` for reading.
    fn open(&self, path: &str) -> io::Result<Box<dyn BufRead + Send>>;
}

/// Joins a child name onto a [`CgroupFs`] path.
pub fn join(parent: &str, name: &str) -> String {
    if parent == ROOT || parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}/{name}")
    }
}

/// Returns the directory portion of a [`CgroupFs`] path, or [`ROOT`] for top-level names.
pub fn parent(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => dir,
        _ => ROOT,
    }
}

/// Returns the final component of a [`CgroupFs`] path.
pub fn basename(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// A [`CgroupFs`] backed by a real directory, usually `/sys/fs/cgroup`.
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path == ROOT {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl CgroupFs for DirFs {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                log::debug!("skipping non UTF-8 entry in `{path}`");
                continue;
            };
            // file_type() does not follow symlinks
            let is_dir = entry.file_type()?.is_dir();
            entries.push(DirEntry { name, is_dir });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn BufRead + Send>> {
        let file = File::open(self.resolve(path))?;
        Ok(Box::new(BufReader::new(file)))
    }
}
