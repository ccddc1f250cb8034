//! Collection of cgroup v2 resource accounting files.
//!
//! This module walks a cgroup2 hierarchy, decodes every accounting file it knows about and
//! streams the resulting samples to a consumer. It is the engine behind the `/metrics`
//! endpoint but has no dependency on it.
//!
//! # Key Components
//!
//! - [`Registry`]: Read-only mapping of file basenames to decoders and metric descriptors,
//!   built from the static table in [`catalog`].
//! - [`CgroupGlob`] and [`Walker`]: Select scan roots and traverse them, opening only
//!   registered files.
//! - [`stats`]: The decoders for the scalar, flat keyed, pressure and `io.stat` formats.
//! - [`Sink`]: Receives [`Measurement`]s in production order.
//! - [`Collector`]: Ties the above together into one collection pass.
//!
//! # Error Isolation
//!
//! A file that cannot be opened or decoded, or a directory that cannot be listed, is logged
//! and skipped. Nothing short of a closed sink ends a pass early.
//!
//! # Example
//!
//! ```rust,no_run
//! use cgroup_exporter::cgroup::Collector;
//! use cgroup_exporter::fsutil::DirFs;
//!
//! let collector = Collector::new(DirFs::new("/sys/fs/cgroup"), "system.slice")?;
//! for m in collector.snapshot() {
//!     println!("{} {:?} {}", m.name(), m.labels(), m.value());
//! }
//! # Ok::<(), cgroup_exporter::error::ConfigError>(())
//! ```
pub mod catalog;
mod collector;
mod registry;
mod sink;
pub mod stats;
mod walker;

pub use collector::{Collector, SINK_CAPACITY};
pub use registry::{
    CGROUP_LABELS, DEVICE_LABELS, FileHandler, FileSpec, MetricDescriptor, MetricKind,
    MetricSpec, MultiFormat, Registry, UnitModifier, micros_to_seconds,
};
pub use sink::{Measurement, Sink, SinkClosed};
pub use walker::{CgroupGlob, DEFAULT_GLOB, ScanRoot, Walker};
