//! Traversal of the cgroup hierarchy.
//!
//! The scan roots come from expanding a glob one directory level per `/`-separated
//! component. Every match is walked depth-first in listing order. For each regular file the
//! basename is looked up in the [`Registry`]; only then is the file opened and decoded.
//! Failures are logged and confined to the file or directory they occurred in.

use globset::{Glob, GlobMatcher};

use super::registry::Registry;
use super::sink::{Sink, SinkClosed};
use super::stats::{self, DecodeError};
use crate::error::{CollectError, ConfigError, ResultOkLogExt};
use crate::fsutil::{self, CgroupFs, ROOT};

/// Glob that selects every top-level cgroup.
pub const DEFAULT_GLOB: &str = "*";

/// A compiled glob over [`CgroupFs`] paths, matched one component per directory level.
#[derive(Debug, Clone)]
pub struct CgroupGlob {
    pattern: String,
    components: Vec<GlobMatcher>,
}

/// A path produced by expanding a [`CgroupGlob`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoot {
    pub path: String,
    pub is_dir: bool,
}

impl CgroupGlob {
    /// Compiles `pattern`; an empty pattern selects every top-level cgroup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGlob`] if a component is not a valid glob.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let pattern = if pattern.is_empty() {
            DEFAULT_GLOB
        } else {
            pattern
        };
        let components = pattern
            .split('/')
            .filter(|c| !c.is_empty() && *c != ROOT)
            .map(|c| {
                Glob::new(c)
                    .map(|g| g.compile_matcher())
                    .map_err(|source| ConfigError::InvalidGlob {
                        pattern: pattern.to_owned(),
                        source,
                    })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self {
            pattern: pattern.to_owned(),
            components,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Expands the glob against `fs`. Matches come out sorted per directory level.
    ///
    /// Directories that cannot be listed are logged and contribute no matches.
    pub fn expand(&self, fs: &dyn CgroupFs) -> Vec<ScanRoot> {
        let mut matches = vec![ScanRoot {
            path: ROOT.to_owned(),
            is_dir: true,
        }];
        for component in &self.components {
            let mut next = Vec::new();
            for parent in matches.iter().filter(|m| m.is_dir) {
                let Some(entries) = fs
                    .read_dir(&parent.path)
                    .map_err(|source| CollectError::TraversalFailure {
                        path: parent.path.clone(),
                        source,
                    })
                    .ok_log()
                else {
                    continue;
                };
                next.extend(
                    entries
                        .into_iter()
                        .filter(|e| component.is_match(&e.name))
                        .map(|e| ScanRoot {
                            path: fsutil::join(&parent.path, &e.name),
                            is_dir: e.is_dir,
                        }),
                );
            }
            matches = next;
        }
        matches
    }
}

/// Walks scan roots and feeds registered files to their decoders.
pub struct Walker<'a> {
    fs: &'a dyn CgroupFs,
    registry: &'a Registry,
}

impl<'a> Walker<'a> {
    pub fn new(fs: &'a dyn CgroupFs, registry: &'a Registry) -> Self {
        Self { fs, registry }
    }

    /// Visits `root` and, if it is a directory, everything below it.
    ///
    /// # Errors
    ///
    /// Only fails with [`SinkClosed`] once the sink stops accepting records; every other
    /// failure is logged and skipped.
    pub fn walk(&self, root: &ScanRoot, sink: &mut dyn Sink) -> Result<(), SinkClosed> {
        if root.is_dir {
            self.walk_dir(&root.path, sink)
        } else {
            self.visit_file(&root.path, sink)
        }
    }

    fn walk_dir(&self, path: &str, sink: &mut dyn Sink) -> Result<(), SinkClosed> {
        let Some(entries) = self
            .fs
            .read_dir(path)
            .map_err(|source| CollectError::TraversalFailure {
                path: path.to_owned(),
                source,
            })
            .ok_log()
        else {
            return Ok(());
        };

        for entry in entries {
            let child = fsutil::join(path, &entry.name);
            if entry.is_dir {
                self.walk_dir(&child, sink)?;
            } else {
                self.visit_file(&child, sink)?;
            }
        }
        Ok(())
    }

    fn visit_file(&self, path: &str, sink: &mut dyn Sink) -> Result<(), SinkClosed> {
        let Some(handler) = self.registry.get(fsutil::basename(path)) else {
            return Ok(());
        };
        log::trace!("decoding `{path}`");

        let Some(mut file) = self
            .fs
            .open(path)
            .map_err(|source| CollectError::OpenFailure {
                path: path.to_owned(),
                source,
            })
            .ok_log()
        else {
            return Ok(());
        };

        match stats::decode(handler, &mut file, fsutil::parent(path), sink) {
            Ok(()) => Ok(()),
            Err(DecodeError::Closed(closed)) => Err(closed),
            Err(source) => {
                log::error!(
                    "{}",
                    CollectError::Decode {
                        path: path.to_owned(),
                        source,
                    }
                );
                Ok(())
            }
        }
    }
}
