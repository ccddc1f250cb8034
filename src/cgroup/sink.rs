//! Output side of a collection pass.
//!
//! Decoders hand every [`Measurement`] to a [`Sink`] as soon as it is parsed. A sink that
//! can no longer accept records answers with [`SinkClosed`], which ends the pass early.

use std::sync::Arc;

use super::registry::MetricDescriptor;

/// One sample: a descriptor, a value, and label values matching the descriptor's label names.
#[derive(Debug, Clone)]
pub struct Measurement {
    descriptor: Arc<MetricDescriptor>,
    value: f64,
    labels: Vec<String>,
}

impl Measurement {
    pub(crate) fn new(descriptor: Arc<MetricDescriptor>, value: f64, labels: Vec<String>) -> Self {
        debug_assert_eq!(descriptor.labels.len(), labels.len());
        Self {
            descriptor,
            value,
            labels,
        }
    }

    pub fn descriptor(&self) -> &MetricDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        self.descriptor.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Label values, in the order of the descriptor's label names.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the value of the label called `name`, if the descriptor has one.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.descriptor
            .labels
            .iter()
            .position(|l| *l == name)
            .map(|i| self.labels[i].as_str())
    }
}

/// The consumer of a [`Sink`] has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("measurement sink closed")]
pub struct SinkClosed;

/// Receives measurements in the order they are produced.
pub trait Sink {
    fn emit(&mut self, measurement: Measurement) -> Result<(), SinkClosed>;
}

impl Sink for Vec<Measurement> {
    fn emit(&mut self, measurement: Measurement) -> Result<(), SinkClosed> {
        self.push(measurement);
        Ok(())
    }
}

/// Blocks until the receiver has room. Must not be used from within an async context;
/// run the pass on a blocking thread instead.
impl Sink for tokio::sync::mpsc::Sender<Measurement> {
    fn emit(&mut self, measurement: Measurement) -> Result<(), SinkClosed> {
        self.blocking_send(measurement).map_err(|_| SinkClosed)
    }
}
