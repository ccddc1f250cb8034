//! Rendering of measurements in the Prometheus text format.
//!
//! Every pass gets its own [`prometheus::Registry`]. Metric vectors are created lazily the
//! first time a descriptor shows up, so metrics without samples are left out of the output.

use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;
use std::string::FromUtf8Error;

use prometheus::{CounterVec, Encoder, GaugeVec, Opts, TextEncoder};

use crate::cgroup::{Measurement, MetricKind};

#[derive(Debug, thiserror::Error)]
pub enum ExpositionError {
    #[error("failed to build metric: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("exposition is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("duplicate sample {name}{labels:?}")]
    Duplicate {
        name: &'static str,
        labels: Vec<String>,
    },
}

enum Family {
    Counter(CounterVec),
    Gauge(GaugeVec),
}

/// Accumulates the measurements of one pass for a scrape response.
#[derive(Default)]
pub struct Exposition {
    registry: prometheus::Registry,
    families: HashMap<&'static str, Family>,
    /// Name and label values of every sample recorded so far.
    seen: HashSet<(&'static str, Vec<String>)>,
}

impl Exposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `measurement` to the exposition.
    ///
    /// Counters only move forward; a negative or NaN counter sample is dropped with a warning.
    /// Only the first sample per name and label values is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ExpositionError::Duplicate`] for a repeated sample, or an error if the metric
    /// cannot be registered, e.g. a name clash with a different label schema.
    pub fn record(&mut self, measurement: &Measurement) -> Result<(), ExpositionError> {
        let descriptor = measurement.descriptor();
        let key = (descriptor.name, measurement.labels().to_vec());
        if self.seen.contains(&key) {
            return Err(ExpositionError::Duplicate {
                name: key.0,
                labels: key.1,
            });
        }
        self.seen.insert(key);
        let family = match self.families.entry(descriptor.name) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let opts = Opts::new(descriptor.name, descriptor.help);
                let family = match descriptor.kind {
                    MetricKind::Counter => {
                        let vec = CounterVec::new(opts, descriptor.labels)?;
                        self.registry.register(Box::new(vec.clone()))?;
                        Family::Counter(vec)
                    }
                    MetricKind::Gauge => {
                        let vec = GaugeVec::new(opts, descriptor.labels)?;
                        self.registry.register(Box::new(vec.clone()))?;
                        Family::Gauge(vec)
                    }
                };
                entry.insert(family)
            }
        };

        let labels: Vec<&str> = measurement.labels().iter().map(String::as_str).collect();
        let value = measurement.value();
        match family {
            Family::Counter(vec) => {
                if value.is_nan() || value < 0.0 {
                    log::warn!(
                        "dropping counter sample {}{:?} with value {value}",
                        descriptor.name,
                        labels
                    );
                    return Ok(());
                }
                vec.get_metric_with_label_values(&labels)?.inc_by(value);
            }
            Family::Gauge(vec) => vec.get_metric_with_label_values(&labels)?.set(value),
        }
        Ok(())
    }

    /// Renders everything recorded so far, sorted by metric name.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode(&self) -> Result<String, ExpositionError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
