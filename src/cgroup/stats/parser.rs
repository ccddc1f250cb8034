//! Line-oriented readers for the two multi-value formats of cgroup v2 interface files.
//!
//! # Formats
//!
//! - **Flat keyed** (`memory.stat`, `cpu.stat`, `*.events`), visited by [`visit_flat_keyed`]:
//!
//!   ```text
//!   KEY0 VAL0
//!   KEY1 VAL1
//!   ```
//!
//! - **Nested keyed** (`io.stat`, `*.pressure`), visited by [`visit_nested_keyed`]:
//!
//!   ```text
//!   KEY0 SUB_KEY0=VAL00 SUB_KEY1=VAL01
//!   KEY1 SUB_KEY0=VAL10 SUB_KEY1=VAL11
//!   ```
//!
//! Both readers stop at the first malformed line. Line numbers in errors are 1-based.
//!
//! # Example
//!
//! ```rust
//! use cgroup_exporter::cgroup::stats::{DecodeError, NestedVisitor, visit_nested_keyed};
//!
//! #[derive(Default)]
//! struct Totals(Vec<(String, String)>);
//!
//! impl NestedVisitor for Totals {
//!     type Entry = String;
//!
//!     fn entry(&mut self, name: &str, _line: usize) -> Result<String, DecodeError> {
//!         Ok(name.to_owned())
//!     }
//!
//!     fn pair(&mut self, entry: &String, key: &str, value: &str, _line: usize) -> Result<(), DecodeError> {
//!         if key == "total" {
//!             self.0.push((entry.clone(), value.to_owned()));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let data = "some avg10=0.08 total=7113021\nfull avg10=0.00 total=0\n";
//! let mut totals = Totals::default();
//! visit_nested_keyed(&mut data.as_bytes(), &mut totals).unwrap();
//! assert_eq!(totals.0[0], ("some".to_owned(), "7113021".to_owned()));
//! ```

use std::io::BufRead;

use super::DecodeError;

/// Calls `visit(key, value, line)` for every `KEY VALUE` line of `buf`.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedLine`] for a line that does not hold exactly two fields,
/// [`DecodeError::Io`] if reading fails, or whatever `visit` returns.
pub fn visit_flat_keyed<R, F>(buf: &mut R, mut visit: F) -> Result<(), DecodeError>
where
    R: BufRead + ?Sized,
    F: FnMut(&str, &str, usize) -> Result<(), DecodeError>,
{
    let mut line = String::new();
    let mut lineno = 0;
    while buf.read_line(&mut line)? != 0 {
        lineno += 1;
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(key), Some(value), None) => visit(key, value, lineno)?,
            _ => {
                return Err(DecodeError::MalformedLine {
                    line: lineno,
                    content: line.trim_end().to_owned(),
                });
            }
        }
        line.clear();
    }
    Ok(())
}

/// Receives the entries and `SUBKEY=VALUE` pairs of a nested keyed file.
pub trait NestedVisitor {
    /// Per-entry state handed back to [`pair`](NestedVisitor::pair).
    type Entry;

    /// Called with the first token of each line. Returning an error stops the file.
    fn entry(&mut self, name: &str, line: usize) -> Result<Self::Entry, DecodeError>;

    /// Called for every `SUBKEY=VALUE` token following the entry name.
    fn pair(
        &mut self,
        entry: &Self::Entry,
        key: &str,
        value: &str,
        line: usize,
    ) -> Result<(), DecodeError>;
}

/// Walks a nested keyed file, feeding each line to `visitor`.
///
/// Blank lines are skipped. An entry followed by no tokens at all (a device without any
/// recorded activity in `io.stat`) is passed to [`NestedVisitor::entry`] and yields no pairs.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedLine`] for a token that does not split into exactly one key
/// and one value around `=`, [`DecodeError::Io`] if reading fails, or whatever the visitor returns.
pub fn visit_nested_keyed<R, V>(buf: &mut R, visitor: &mut V) -> Result<(), DecodeError>
where
    R: BufRead + ?Sized,
    V: NestedVisitor + ?Sized,
{
    let mut line = String::new();
    let mut lineno = 0;
    while buf.read_line(&mut line)? != 0 {
        lineno += 1;
        let mut tokens = line.split_whitespace();
        if let Some(name) = tokens.next() {
            let entry = visitor.entry(name, lineno)?;
            for token in tokens {
                let Some((key, value)) = token.split_once('=').filter(|(_, v)| !v.contains('='))
                else {
                    return Err(DecodeError::MalformedLine {
                        line: lineno,
                        content: line.trim_end().to_owned(),
                    });
                };
                visitor.pair(&entry, key, value, lineno)?;
            }
        }
        line.clear();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        entries: Vec<String>,
        pairs: Vec<(String, String, String)>,
    }

    impl NestedVisitor for Recorder {
        type Entry = String;

        fn entry(&mut self, name: &str, _line: usize) -> Result<String, DecodeError> {
            self.entries.push(name.to_owned());
            Ok(name.to_owned())
        }

        fn pair(
            &mut self,
            entry: &String,
            key: &str,
            value: &str,
            _line: usize,
        ) -> Result<(), DecodeError> {
            self.pairs
                .push((entry.clone(), key.to_owned(), value.to_owned()));
            Ok(())
        }
    }

    fn pair(entry: &str, key: &str, value: &str) -> (String, String, String) {
        (entry.to_owned(), key.to_owned(), value.to_owned())
    }

    #[test]
    fn test_visit_flat_keyed() {
        let data = "usage_usec 1000\nnr_periods 10\n";
        let mut seen = Vec::new();
        visit_flat_keyed(&mut data.as_bytes(), |k, v, line| {
            seen.push((k.to_owned(), v.to_owned(), line));
            Ok(())
        })
        .unwrap();
        assert_eq!(
            seen,
            vec![
                ("usage_usec".to_owned(), "1000".to_owned(), 1),
                ("nr_periods".to_owned(), "10".to_owned(), 2),
            ]
        );
    }

    #[test]
    fn test_visit_flat_keyed_rejects_three_fields() {
        let data = "anon 1\nfile 2 3\nshmem 4\n";
        let mut seen = 0;
        let err = visit_flat_keyed(&mut data.as_bytes(), |_, _, _| {
            seen += 1;
            Ok(())
        })
        .unwrap_err();
        match err {
            DecodeError::MalformedLine { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "file 2 3");
            }
            other => panic!("Expected MalformedLine error, got {other:?}"),
        }
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_visit_flat_keyed_rejects_single_field() {
        let data = "anon\n";
        let err = visit_flat_keyed(&mut data.as_bytes(), |_, _, _| Ok(())).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_visit_flat_keyed_propagates_visitor_error() {
        let data = "anon 1\n";
        let err = visit_flat_keyed(&mut data.as_bytes(), |_, _, line| {
            Err(DecodeError::UnknownEntryKind {
                entry: "anon".to_owned(),
                line,
            })
        })
        .unwrap_err();
        assert!(matches!(err, DecodeError::UnknownEntryKind { line: 1, .. }));
    }

    #[test]
    fn test_visit_nested_keyed_pressure() {
        let data = "\
some avg10=0.08 avg60=0.03 avg300=0.06 total=7113021
full avg10=0.00 avg60=0.00 avg300=0.00 total=0
";
        let mut recorder = Recorder::default();
        visit_nested_keyed(&mut data.as_bytes(), &mut recorder).unwrap();
        assert_eq!(recorder.entries, vec!["some", "full"]);
        assert_eq!(recorder.pairs.len(), 8);
        assert_eq!(recorder.pairs[0], pair("some", "avg10", "0.08"));
        assert_eq!(recorder.pairs[3], pair("some", "total", "7113021"));
        assert_eq!(recorder.pairs[7], pair("full", "total", "0"));
    }

    #[test]
    fn test_visit_nested_keyed_entries_without_pairs() {
        let data = "\n7:7 \n7:6 \n254:0 rbytes=4235943936 wbytes=37844828160\n";
        let mut recorder = Recorder::default();
        visit_nested_keyed(&mut data.as_bytes(), &mut recorder).unwrap();
        assert_eq!(recorder.entries, vec!["7:7", "7:6", "254:0"]);
        assert_eq!(
            recorder.pairs,
            vec![
                pair("254:0", "rbytes", "4235943936"),
                pair("254:0", "wbytes", "37844828160"),
            ]
        );
    }

    #[test]
    fn test_visit_nested_keyed_rejects_bad_tokens() {
        for data in ["8:0 rbytes=1 malformed\n", "8:0 rbytes=1=2\n"] {
            let mut recorder = Recorder::default();
            let err = visit_nested_keyed(&mut data.as_bytes(), &mut recorder).unwrap_err();
            assert!(
                matches!(err, DecodeError::MalformedLine { line: 1, .. }),
                "{data:?}: {err:?}"
            );
        }
    }
}
