use std::time::Instant;

use super::registry::Registry;
use super::sink::{Measurement, Sink, SinkClosed};
use super::walker::{CgroupGlob, Walker};
use crate::error::ConfigError;
use crate::fsutil::CgroupFs;

/// Number of measurements buffered between a pass and its consumer.
pub const SINK_CAPACITY: usize = 256;

/// Collects snapshots of every registered accounting file below the selected cgroups.
///
/// A collector holds no mutable state, so concurrent passes may share one instance.
pub struct Collector {
    fs: Box<dyn CgroupFs>,
    glob: CgroupGlob,
    registry: Registry,
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("glob", &self.glob.as_str())
            .field("files", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// Forwards to another sink while counting.
struct Counted<'a> {
    inner: &'a mut dyn Sink,
    count: usize,
}

impl Sink for Counted<'_> {
    fn emit(&mut self, measurement: Measurement) -> Result<(), SinkClosed> {
        self.inner.emit(measurement)?;
        self.count += 1;
        Ok(())
    }
}

impl Collector {
    /// Creates a collector over `fs` using the built-in [`Registry`].
    ///
    /// # Arguments
    ///
    /// * `fs` - The cgroup hierarchy, usually a [`DirFs`](crate::fsutil::DirFs) at `/sys/fs/cgroup`.
    /// * `glob` - Selects the cgroups to scan; empty selects all of them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGlob`] if `glob` does not compile.
    pub fn new(fs: impl CgroupFs + 'static, glob: &str) -> Result<Self, ConfigError> {
        Self::with_registry(fs, glob, Registry::default())
    }

    /// Creates a collector with a custom [`Registry`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGlob`] if `glob` does not compile.
    pub fn with_registry(
        fs: impl CgroupFs + 'static,
        glob: &str,
        registry: Registry,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            fs: Box::new(fs),
            glob: CgroupGlob::new(glob)?,
            registry,
        })
    }

    /// Runs one collection pass, emitting every measurement into `sink`.
    ///
    /// Failures of individual files or directories are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SinkClosed`] if the sink stopped accepting records; the pass is abandoned.
    pub fn collect_into(&self, sink: &mut dyn Sink) -> Result<(), SinkClosed> {
        let before = Instant::now();
        let walker = Walker::new(self.fs.as_ref(), &self.registry);
        let mut counted = Counted {
            inner: sink,
            count: 0,
        };

        let result = self
            .glob
            .expand(self.fs.as_ref())
            .iter()
            .try_for_each(|root| walker.walk(root, &mut counted));

        match result {
            Ok(()) => log::debug!(
                "collected {} measurements from `{}` in {} microseconds",
                counted.count,
                self.glob.as_str(),
                before.elapsed().as_micros()
            ),
            Err(SinkClosed) => log::debug!(
                "collection pass abandoned by consumer after {} measurements",
                counted.count
            ),
        }
        result
    }

    /// Runs one collection pass and returns all measurements.
    pub fn snapshot(&self) -> Vec<Measurement> {
        let mut out: Vec<Measurement> = Vec::new();
        // a Vec never closes
        let _ = self.collect_into(&mut out);
        out
    }
}
