//! Single-value files such as `memory.current`, `memory.max` or `pids.max`.
//!
//! These hold one number, or the literal `max` when no bound is configured. `max` is not an
//! error: the record is simply left out.

use std::io::BufRead;
use std::sync::Arc;

use super::DecodeError;
use super::error::parse_value;
use crate::cgroup::registry::MetricDescriptor;
use crate::cgroup::sink::{Measurement, Sink};

/// Marks an unlimited bound in cgroup v2 interface files.
pub const UNLIMITED: &str = "max";

/// Emits the first token of `buf` as a single measurement labelled with `cgroup`.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedLine`] if the file holds no token and
/// [`DecodeError::ParseFailure`] if the token is neither a number nor `max`.
pub fn decode_scalar(
    buf: &mut dyn BufRead,
    cgroup: &str,
    descriptor: &Arc<MetricDescriptor>,
    sink: &mut dyn Sink,
) -> Result<(), DecodeError> {
    let mut content = String::new();
    buf.read_to_string(&mut content)?;
    let Some(token) = content.split_whitespace().next() else {
        return Err(DecodeError::MalformedLine {
            line: 1,
            content: content.trim_end().to_owned(),
        });
    };
    if token == UNLIMITED {
        return Ok(());
    }

    let value = parse_value(descriptor.name, token, 1)?;
    sink.emit(Measurement::new(
        Arc::clone(descriptor),
        descriptor.convert(value),
        vec![cgroup.to_owned()],
    ))?;
    Ok(())
}
