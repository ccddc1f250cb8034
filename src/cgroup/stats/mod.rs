//! Decoders turning cgroup v2 accounting files into [`Measurement`](super::Measurement)s.
//!
//! Each decoder reads one open file and emits its records into a [`Sink`] as it goes. The
//! walker picks the decoder through [`decode`], a single match over the registered
//! [`FileHandler`].
//!
//! # Decoders
//!
//! - [`scalar::decode_scalar`]: one token, or the sentinel `max` which yields nothing.
//! - [`flat::decode_flat`]: `KEY VALUE` lines, unknown keys skipped.
//! - [`pressure::decode_pressure`]: `some`/`full` entries, only `total` collected.
//! - [`io::decode_io_stat`]: device entries with `SUBKEY=VALUE` tokens.

mod error;
mod flat;
mod io;
mod parser;
mod pressure;
mod scalar;

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::Arc;

pub use error::DecodeError;
pub use flat::decode_flat;
pub use io::decode_io_stat;
pub use parser::{NestedVisitor, visit_flat_keyed, visit_nested_keyed};
pub use pressure::decode_pressure;
pub use scalar::decode_scalar;

use super::registry::{FileHandler, MetricDescriptor, MultiFormat};
use super::sink::Sink;

/// Descriptors of a multi-value file, keyed by sub-key.
pub type Descriptors = HashMap<&'static str, Arc<MetricDescriptor>>;

/// Decodes `buf` with the algorithm `handler` was registered with.
///
/// `cgroup` is the directory of the file relative to the scan root and becomes the `cgroup`
/// label of every emitted record.
///
/// # Errors
///
/// Returns the [`DecodeError`] that stopped decoding. Records emitted before the error stay emitted.
pub fn decode(
    handler: &FileHandler,
    buf: &mut dyn BufRead,
    cgroup: &str,
    sink: &mut dyn Sink,
) -> Result<(), DecodeError> {
    match handler {
        FileHandler::Single { descriptor } => decode_scalar(buf, cgroup, descriptor, sink),
        FileHandler::Multi {
            format: MultiFormat::FlatKeyed,
            descriptors,
        } => decode_flat(buf, cgroup, descriptors, sink),
        FileHandler::Multi {
            format: MultiFormat::Pressure,
            descriptors,
        } => decode_pressure(buf, cgroup, descriptors, sink),
        FileHandler::Multi {
            format: MultiFormat::DeviceNested,
            descriptors,
        } => decode_io_stat(buf, cgroup, descriptors, sink),
    }
}
