//! Reading sample values out of whitespace-delimited text
//!
//! Each non-blank line contributes at most one sample: the field at the
//! configured column, if it passes the inclusive range filter.

use crate::config::HistConfig;
use robust_core::{Error, Result, Sample, SourceId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, instrument};

/// Inclusive `[minimum, maximum]` filter; either side may be open
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValueRange {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl ValueRange {
    pub fn new(minimum: Option<f64>, maximum: Option<f64>) -> Self {
        Self { minimum, maximum }
    }

    /// A range that keeps every value
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Whether `value` lies within the range, bounds included
    pub fn contains(&self, value: f64) -> bool {
        self.minimum.map_or(true, |min| value >= min)
            && self.maximum.map_or(true, |max| value <= max)
    }
}

/// Parses one column of a text stream into samples
#[derive(Debug, Clone, Copy)]
pub struct ValueExtractor {
    column: usize,
    range: ValueRange,
}

impl ValueExtractor {
    /// Create an extractor for the one-based `column`
    pub fn new(column: usize) -> Result<Self> {
        if column == 0 {
            return Err(Error::InvalidParameter(
                "column is one-based and must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            column,
            range: ValueRange::unbounded(),
        })
    }

    /// Build an extractor from a validated configuration
    pub fn from_config(config: &HistConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.column)?.with_range(config.range()))
    }

    /// Only keep values inside `range`
    pub fn with_range(mut self, range: ValueRange) -> Self {
        self.range = range;
        self
    }

    /// Read `reader` to the end and return the samples it contains
    ///
    /// `origin` names the stream in error messages. Blank lines are skipped.
    /// A line whose column is missing or not a finite number aborts the
    /// extraction with [`Error::MalformedValue`].
    #[instrument(skip(self, reader, source), fields(source = source.index(), column = self.column))]
    pub fn extract<R: BufRead>(
        &self,
        mut reader: R,
        source: SourceId,
        origin: &str,
    ) -> Result<Vec<Sample>> {
        let mut samples = Vec::new();
        let mut line = String::new();
        let mut line_number = 0;
        let mut filtered = 0usize;

        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| Error::channel_open(origin, e))?;
            if read == 0 {
                break;
            }
            line_number += 1;

            let text = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            if text.trim().is_empty() {
                continue;
            }

            let value = self.parse_field(text).ok_or_else(|| Error::MalformedValue {
                origin: origin.to_string(),
                line_number,
                column: self.column,
                line: text.to_string(),
            })?;

            if self.range.contains(value) {
                samples.push(Sample::new(value, source));
            } else {
                filtered += 1;
            }
        }

        debug!(
            "Extracted {} samples from {} lines of {} ({} outside range)",
            samples.len(),
            line_number,
            origin,
            filtered
        );
        Ok(samples)
    }

    /// Open `path` and extract its samples
    pub fn extract_path(&self, path: &Path, source: SourceId) -> Result<Vec<Sample>> {
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|e| Error::channel_open(origin.as_str(), e))?;
        self.extract(BufReader::new(file), source, &origin)
    }

    fn parse_field(&self, line: &str) -> Option<f64> {
        line.split_whitespace()
            .nth(self.column - 1)?
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SOURCE: SourceId = SourceId::new(0);

    fn values(extractor: &ValueExtractor, input: &str) -> Result<Vec<f64>> {
        let samples = extractor.extract(Cursor::new(input), SOURCE, "test")?;
        Ok(samples.into_iter().map(|s| s.value).collect())
    }

    #[test]
    fn test_reads_first_column_by_default() {
        let extractor = ValueExtractor::new(1).unwrap();
        let got = values(&extractor, "1 a\n2.5 b\n-3e2 c\n").unwrap();
        assert_eq!(got, vec![1.0, 2.5, -300.0]);
    }

    #[test]
    fn test_reads_requested_column() {
        let extractor = ValueExtractor::new(3).unwrap();
        let got = values(&extractor, "x\ty  7\n  a b\t\t8.25 z\n").unwrap();
        assert_eq!(got, vec![7.0, 8.25]);
    }

    #[test]
    fn test_skips_blank_lines() {
        let extractor = ValueExtractor::new(1).unwrap();
        let got = values(&extractor, "\n1\n   \n\t\r\n2\r\n\n").unwrap();
        assert_eq!(got, vec![1.0, 2.0]);
    }

    #[test]
    fn test_tags_samples_with_source() {
        let extractor = ValueExtractor::new(1).unwrap();
        let samples = extractor
            .extract(Cursor::new("4\n5\n"), SourceId::new(7), "test")
            .unwrap();
        assert!(samples.iter().all(|s| s.source == SourceId::new(7)));
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        let extractor = ValueExtractor::new(2).unwrap();
        let err = values(&extractor, "1 2\n3 four\n5 6\n").unwrap_err();
        match err {
            Error::MalformedValue {
                origin,
                line_number,
                column,
                line,
            } => {
                assert_eq!(origin, "test");
                assert_eq!(line_number, 2);
                assert_eq!(column, 2);
                assert_eq!(line, "3 four");
            }
            other => panic!("Wrong error type: {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let extractor = ValueExtractor::new(3).unwrap();
        let err = values(&extractor, "1 2 3\n4 5\n").unwrap_err();
        assert!(err.to_string().contains("column 3 is not a number in: 4 5"));
    }

    #[test]
    fn test_non_finite_is_malformed() {
        let extractor = ValueExtractor::new(1).unwrap();
        for input in ["nan\n", "inf\n", "-infinity\n"] {
            assert!(matches!(
                values(&extractor, input),
                Err(Error::MalformedValue { .. })
            ));
        }
    }

    #[test]
    fn test_inclusive_range() {
        let extractor = ValueExtractor::new(1)
            .unwrap()
            .with_range(ValueRange::new(Some(2.0), Some(4.0)));
        let got = values(&extractor, "1\n2\n3\n4\n5\n").unwrap();
        assert_eq!(got, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_half_open_ranges() {
        let only_min = ValueRange::new(Some(0.0), None);
        assert!(only_min.contains(0.0));
        assert!(only_min.contains(1e300));
        assert!(!only_min.contains(-1e-9));

        let only_max = ValueRange::new(None, Some(0.0));
        assert!(only_max.contains(0.0));
        assert!(!only_max.contains(1.0));

        assert!(ValueRange::unbounded().contains(f64::MIN));
    }

    #[test]
    fn test_filtered_lines_are_still_validated() {
        let extractor = ValueExtractor::new(1)
            .unwrap()
            .with_range(ValueRange::new(Some(100.0), None));
        assert!(values(&extractor, "1\noops\n").is_err());
    }

    #[test]
    fn test_column_zero_rejected() {
        assert!(matches!(
            ValueExtractor::new(0),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_missing_file_is_channel_error() {
        let extractor = ValueExtractor::new(1).unwrap();
        let err = extractor
            .extract_path(Path::new("/definitely/not/here.txt"), SOURCE)
            .unwrap_err();
        assert!(matches!(err, Error::ChannelOpen { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_invalid_utf8_is_channel_error() {
        let extractor = ValueExtractor::new(1).unwrap();
        let err = extractor
            .extract(Cursor::new(vec![b'1', b'\n', 0xff, 0xfe, b'\n']), SOURCE, "<stdin>")
            .unwrap_err();
        assert!(matches!(err, Error::ChannelOpen { .. }));
        assert!(err.to_string().starts_with("Cannot open or read <stdin>: "));
    }
}
