//! Mapping from accounting file basenames to decoders and metric descriptors.
//!
//! A [`Registry`] is built once from a static table of [`FileSpec`]s (see
//! [`catalog`](super::catalog)) and is read-only afterwards, so any number of collection
//! passes may share it without coordination.
//!
//! # Example
//!
//! ```rust
//! use cgroup_exporter::cgroup::{FileHandler, Registry};
//!
//! let registry = Registry::default();
//! assert!(matches!(registry.get("memory.current"), Some(FileHandler::Single { .. })));
//! assert!(matches!(registry.get("memory.stat"), Some(FileHandler::Multi { .. })));
//! assert!(registry.get("cgroup.procs").is_none());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

/// Converts a raw accounting value into the unit a metric is exported in.
pub type UnitModifier = fn(f64) -> f64;

/// Label schema of metrics scoped to a cgroup.
pub const CGROUP_LABELS: &[&str] = &["cgroup"];
/// Label schema of metrics scoped to a block device within a cgroup.
pub const DEVICE_LABELS: &[&str] = &["device", "cgroup"];

pub fn micros_to_seconds(micros: f64) -> f64 {
    micros / 1e6
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Counter,
}

/// Immutable description of one exported metric.
#[derive(Debug, Clone)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    /// Label names; the last one is always `cgroup`.
    pub labels: &'static [&'static str],
    pub kind: MetricKind,
    pub modifier: Option<UnitModifier>,
}

impl MetricDescriptor {
    /// Applies the unit modifier, if any.
    #[inline]
    pub fn convert(&self, value: f64) -> f64 {
        match self.modifier {
            Some(modifier) => modifier(value),
            None => value,
        }
    }
}

/// Decode algorithm of a file exposing several metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiFormat {
    /// `KEY VALUE` per line, e.g. `memory.stat`.
    FlatKeyed,
    /// `some`/`full` entries of which only `total` is collected, e.g. `cpu.pressure`.
    Pressure,
    /// Device entries with `SUBKEY=VALUE` tokens, i.e. `io.stat`.
    DeviceNested,
}

/// How a registered file is decoded.
#[derive(Debug, Clone)]
pub enum FileHandler {
    /// A file holding one value, or the sentinel `max`.
    Single { descriptor: Arc<MetricDescriptor> },
    /// A file holding several values, looked up by sub-key.
    Multi {
        format: MultiFormat,
        descriptors: HashMap<&'static str, Arc<MetricDescriptor>>,
    },
}

/// One metric row of the static table.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    /// Sub-key inside the file; ignored for single-value files.
    pub key: &'static str,
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
    pub kind: MetricKind,
    pub modifier: Option<UnitModifier>,
}

impl MetricSpec {
    pub const fn gauge(key: &'static str, name: &'static str, help: &'static str) -> Self {
        Self {
            key,
            name,
            help,
            labels: CGROUP_LABELS,
            kind: MetricKind::Gauge,
            modifier: None,
        }
    }

    pub const fn counter(key: &'static str, name: &'static str, help: &'static str) -> Self {
        Self {
            kind: MetricKind::Counter,
            ..Self::gauge(key, name, help)
        }
    }

    /// Exports a microsecond value in seconds.
    pub const fn micros(self) -> Self {
        Self {
            modifier: Some(micros_to_seconds),
            ..self
        }
    }

    /// Adds a leading `device` label.
    pub const fn per_device(self) -> Self {
        Self {
            labels: DEVICE_LABELS,
            ..self
        }
    }

    fn descriptor(&self) -> Arc<MetricDescriptor> {
        Arc::new(MetricDescriptor {
            name: self.name,
            help: self.help,
            labels: self.labels,
            kind: self.kind,
            modifier: self.modifier,
        })
    }
}

/// One file row of the static table.
#[derive(Debug, Clone, Copy)]
pub enum FileSpec {
    Single {
        file: &'static str,
        metric: MetricSpec,
    },
    Multi {
        file: &'static str,
        format: MultiFormat,
        metrics: &'static [MetricSpec],
    },
}

impl FileSpec {
    pub fn file(&self) -> &'static str {
        match self {
            FileSpec::Single { file, .. } | FileSpec::Multi { file, .. } => file,
        }
    }
}

/// Read-only lookup of [`FileHandler`]s by file basename.
#[derive(Debug, Clone)]
pub struct Registry {
    handlers: HashMap<&'static str, FileHandler>,
}

impl Registry {
    /// Builds a registry from a declarative table. Later rows win on duplicate basenames.
    pub fn from_table(table: &[FileSpec]) -> Self {
        let handlers = table
            .iter()
            .map(|spec| {
                let handler = match spec {
                    FileSpec::Single { metric, .. } => FileHandler::Single {
                        descriptor: metric.descriptor(),
                    },
                    FileSpec::Multi {
                        format, metrics, ..
                    } => FileHandler::Multi {
                        format: *format,
                        descriptors: metrics.iter().map(|m| (m.key, m.descriptor())).collect(),
                    },
                };
                (spec.file(), handler)
            })
            .collect();
        Self { handlers }
    }

    /// Returns the handler for `basename`, or `None` if the file must be left alone.
    #[inline]
    pub fn get(&self, basename: &str) -> Option<&FileHandler> {
        self.handlers.get(basename)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates over every descriptor, in no particular order.
    pub fn descriptors(&self) -> impl Iterator<Item = &MetricDescriptor> {
        self.handlers.values().flat_map(|handler| {
            let descriptors: Box<dyn Iterator<Item = &Arc<MetricDescriptor>>> = match handler {
                FileHandler::Single { descriptor } => Box::new(std::iter::once(descriptor)),
                FileHandler::Multi { descriptors, .. } => Box::new(descriptors.values()),
            };
            descriptors.map(|d| d.as_ref())
        })
    }
}

impl Default for Registry {
    /// The registry of every accounting file this exporter knows.
    fn default() -> Self {
        Self::from_table(super::catalog::FILES)
    }
}
