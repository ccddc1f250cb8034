//! This module decodes the per-device I/O statistics of cgroup `io.stat` files.
//!
//! Each line starts with a `MAJOR:MINOR` device number followed by `KEY=VALUE` pairs:
//!
//! ```text
//! 254:0 rbytes=4235943936 wbytes=37844828160 rios=72223 wios=2392288 dbytes=0 dios=0
//! 7:0
//! ```
//!
//! Every known key yields a record labelled with the device and the cgroup. Devices are not
//! aggregated. A device listed without any pairs has no recorded activity and yields nothing.

use std::io::BufRead;
use std::sync::Arc;

use super::error::parse_value;
use super::{DecodeError, Descriptors, NestedVisitor, visit_nested_keyed};
use crate::cgroup::sink::{Measurement, Sink};

struct IoStatVisitor<'a> {
    cgroup: &'a str,
    descriptors: &'a Descriptors,
    sink: &'a mut dyn Sink,
}

impl NestedVisitor for IoStatVisitor<'_> {
    /// The device number.
    type Entry = String;

    fn entry(&mut self, name: &str, _line: usize) -> Result<String, DecodeError> {
        Ok(name.to_owned())
    }

    fn pair(
        &mut self,
        device: &String,
        key: &str,
        value: &str,
        line: usize,
    ) -> Result<(), DecodeError> {
        let Some(descriptor) = self.descriptors.get(key) else {
            return Ok(());
        };
        let value = parse_value(key, value, line)?;
        self.sink.emit(Measurement::new(
            Arc::clone(descriptor),
            descriptor.convert(value),
            vec![device.clone(), self.cgroup.to_owned()],
        ))?;
        Ok(())
    }
}

/// Emits one measurement per known key and device of `buf`.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedLine`] for a token that is not `KEY=VALUE` and
/// [`DecodeError::ParseFailure`] for a known key whose value is not a number.
pub fn decode_io_stat(
    buf: &mut dyn BufRead,
    cgroup: &str,
    descriptors: &Descriptors,
    sink: &mut dyn Sink,
) -> Result<(), DecodeError> {
    let mut visitor = IoStatVisitor {
        cgroup,
        descriptors,
        sink,
    };
    visit_nested_keyed(buf, &mut visitor)
}
