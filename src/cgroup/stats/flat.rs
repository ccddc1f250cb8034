//! Flat keyed files such as `memory.stat`, `cpu.stat`, `memory.events` and `pids.events`.
//!
//! Every known key becomes one record; keys the registry does not know are skipped since
//! kernels keep adding fields. A malformed line, on the other hand, stops the file.

use std::io::BufRead;
use std::sync::Arc;

use super::error::parse_value;
use super::{DecodeError, Descriptors, visit_flat_keyed};
use crate::cgroup::sink::{Measurement, Sink};

/// Emits one measurement per known `KEY VALUE` line of `buf`, labelled with `cgroup`.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedLine`] for a line without exactly two fields and
/// [`DecodeError::ParseFailure`] for a known key whose value is not a number.
pub fn decode_flat(
    buf: &mut dyn BufRead,
    cgroup: &str,
    descriptors: &Descriptors,
    sink: &mut dyn Sink,
) -> Result<(), DecodeError> {
    visit_flat_keyed(buf, |key, value, line| {
        let Some(descriptor) = descriptors.get(key) else {
            return Ok(());
        };
        let value = parse_value(key, value, line)?;
        sink.emit(Measurement::new(
            Arc::clone(descriptor),
            descriptor.convert(value),
            vec![cgroup.to_owned()],
        ))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cgroup::registry::MetricSpec;
    use crate::cgroup::stats::testutil::{ClosingSink, descriptors};

    fn cpu_stat() -> Descriptors {
        descriptors(&[
            MetricSpec::counter("usage_usec", "cgroup_cpu_usage_seconds_total", "CPU time.").micros(),
            MetricSpec::counter("nr_periods", "cgroup_cpu_periods_total", "Periods."),
        ])
    }

    #[test]
    fn test_parse_cpu_stat() {
        let data = "\
usage_usec 1500000
user_usec 600000
nr_periods 10
";
        let mut out: Vec<Measurement> = Vec::new();
        decode_flat(&mut data.as_bytes(), "system.slice", &cpu_stat(), &mut out).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name(), "cgroup_cpu_usage_seconds_total");
        assert_eq!(out[0].value(), 1.5);
        assert_eq!(out[1].name(), "cgroup_cpu_periods_total");
        assert_eq!(out[1].value(), 10.0);
        for m in &out {
            assert_eq!(m.label("cgroup"), Some("system.slice"));
        }
    }

    #[test]
    fn test_ignore_unknown_keys() {
        let data = "foo 1\nbar 2\n";
        let mut out: Vec<Measurement> = Vec::new();
        decode_flat(&mut data.as_bytes(), ".", &cpu_stat(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_malformed_line_stops_file() {
        let data = "usage_usec 1000000\nnr_periods 10 20\nnr_periods 30\n";
        let mut out: Vec<Measurement> = Vec::new();
        let err = decode_flat(&mut data.as_bytes(), ".", &cpu_stat(), &mut out).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedLine { line: 2, .. }));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_invalid_value() {
        let data = "nr_periods ten\n";
        let mut out: Vec<Measurement> = Vec::new();
        let err = decode_flat(&mut data.as_bytes(), ".", &cpu_stat(), &mut out).unwrap_err();
        match err {
            DecodeError::ParseFailure {
                key, value, line, ..
            } => {
                assert_eq!(key, "nr_periods");
                assert_eq!(value, "ten");
                assert_eq!(line, 1);
            }
            other => panic!("Expected ParseFailure error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_value_of_unknown_key_is_ignored() {
        let data = "foo bar\nnr_periods 1\n";
        let mut out: Vec<Measurement> = Vec::new();
        decode_flat(&mut data.as_bytes(), ".", &cpu_stat(), &mut out).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_closed_sink_stops_decoding() {
        let data = "usage_usec 1\nnr_periods 2\n";
        let mut sink = ClosingSink {
            capacity: 1,
            received: Vec::new(),
        };
        let err = decode_flat(&mut data.as_bytes(), ".", &cpu_stat(), &mut sink).unwrap_err();
        assert!(matches!(err, DecodeError::Closed(_)));
        assert_eq!(sink.received.len(), 1);
    }
}
