//! Pressure stall information files: `cpu.pressure`, `memory.pressure`, `io.pressure` and
//! `irq.pressure`.
//!
//! ```text
//! some avg10=0.08 avg60=0.03 avg300=0.06 total=7113021
//! full avg10=0.00 avg60=0.00 avg300=0.00 total=0
//! ```
//!
//! Only the cumulative `total` (microseconds) is collected; the rolling averages can be
//! derived from it. The set of entries is closed, so an unregistered entry name is an error.

use std::io::BufRead;
use std::sync::Arc;

use super::error::parse_value;
use super::{DecodeError, Descriptors, NestedVisitor, visit_nested_keyed};
use crate::cgroup::registry::MetricDescriptor;
use crate::cgroup::sink::{Measurement, Sink};

const TOTAL: &str = "total";

struct PressureVisitor<'a> {
    cgroup: &'a str,
    descriptors: &'a Descriptors,
    sink: &'a mut dyn Sink,
}

impl<'a> NestedVisitor for PressureVisitor<'a> {
    type Entry = &'a Arc<MetricDescriptor>;

    fn entry(&mut self, name: &str, line: usize) -> Result<Self::Entry, DecodeError> {
        self.descriptors
            .get(name)
            .ok_or_else(|| DecodeError::UnknownEntryKind {
                entry: name.to_owned(),
                line,
            })
    }

    fn pair(
        &mut self,
        entry: &Self::Entry,
        key: &str,
        value: &str,
        line: usize,
    ) -> Result<(), DecodeError> {
        if key != TOTAL {
            return Ok(());
        }
        let value = parse_value(key, value, line)?;
        self.sink.emit(Measurement::new(
            Arc::clone(entry),
            entry.convert(value),
            vec![self.cgroup.to_owned()],
        ))?;
        Ok(())
    }
}

/// Emits the `total` of every pressure entry in `buf`, labelled with `cgroup`.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownEntryKind`] for an entry without a descriptor,
/// [`DecodeError::MalformedLine`] for a token that is not `KEY=VALUE`, and
/// [`DecodeError::ParseFailure`] for a `total` that is not a number.
pub fn decode_pressure(
    buf: &mut dyn BufRead,
    cgroup: &str,
    descriptors: &Descriptors,
    sink: &mut dyn Sink,
) -> Result<(), DecodeError> {
    let mut visitor = PressureVisitor {
        cgroup,
        descriptors,
        sink,
    };
    visit_nested_keyed(buf, &mut visitor)
}
