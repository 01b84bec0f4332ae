//! Core types for histogram representation

use crate::format::GeneralFloat;
use crate::traits::BinSink;
use robust_core::{Error, Result, SourceId};
use std::collections::BTreeMap;
use std::fmt;

/// One output row: the lower bound of a bin and a source's count in it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinRow {
    /// Left edge of the bin (inclusive)
    pub lower: f64,
    /// Number of samples from one source in `[lower, lower + width)`
    pub count: u64,
}

impl BinRow {
    pub fn new(lower: f64, count: u64) -> Self {
        Self { lower, count }
    }
}

impl fmt::Display for BinRow {
    /// Renders the row in the `<bound> <count>` output format
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", GeneralFloat::new(self.lower), self.count)
    }
}

/// Whether bins with a zero count are written out
///
/// `Skip` is the default. `Emit` writes a row for every bin of every source,
/// so the per-source outputs are line-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyBinPolicy {
    /// Suppress rows whose count is zero
    #[default]
    Skip,
    /// Emit every row, including zero counts
    Emit,
}

impl EmptyBinPolicy {
    /// Whether a row with `count` should be written under this policy
    pub fn should_emit(self, count: u64) -> bool {
        match self {
            Self::Skip => count > 0,
            Self::Emit => true,
        }
    }
}

/// Distribution statistics behind a bin width decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinStatistics {
    /// Number of samples in the pool
    pub n: usize,
    /// Index-based 25th percentile
    pub p25: f64,
    /// Index-based 75th percentile
    pub p75: f64,
    /// Width shared by every bin
    pub bin_width: f64,
    /// Smallest sample, the lower bound of the first bin
    pub min: f64,
    /// Largest sample
    pub max: f64,
}

impl BinStatistics {
    /// Interquartile range from the index-based percentiles
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }

    /// Approximate number of bins spanned by the data
    pub fn estimated_bins(&self) -> f64 {
        (self.max - self.min) / self.bin_width
    }

    /// Check that the width can drive a sweep
    ///
    /// The width must be finite, strictly positive, and large enough that
    /// `min + width` is distinguishable from `min`.
    pub fn validate(&self) -> Result<()> {
        if !(self.bin_width.is_finite() && self.bin_width > 0.0) {
            return Err(Error::DegenerateBinWidth(format!(
                "bin width {} from n = {}, p25 = {}, p75 = {} is not a positive finite number",
                self.bin_width, self.n, self.p25, self.p75
            )));
        }
        if self.min + self.bin_width <= self.min {
            return Err(Error::DegenerateBinWidth(format!(
                "bin width {} is too small to separate values near {}",
                self.bin_width, self.min
            )));
        }
        Ok(())
    }

    /// Write the verbose statistics report, one `name = value` per line
    pub fn write_report<W: std::io::Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "n = {}", self.n)?;
        writeln!(out, "p25 = {}", GeneralFloat::new(self.p25))?;
        writeln!(out, "p75 = {}", GeneralFloat::new(self.p75))?;
        writeln!(out, "bin_width = {}", GeneralFloat::new(self.bin_width))?;
        writeln!(out, "min = {}", GeneralFloat::new(self.min))?;
        writeln!(out, "max = {}", GeneralFloat::new(self.max))?;
        writeln!(out, "num_bins = {}", GeneralFloat::new(self.estimated_bins()))
    }
}

impl fmt::Display for BinStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BinStatistics(n={}, iqr=[{}, {}], width={}, range=[{}, {}])",
            self.n,
            GeneralFloat::new(self.p25),
            GeneralFloat::new(self.p75),
            GeneralFloat::new(self.bin_width),
            GeneralFloat::new(self.min),
            GeneralFloat::new(self.max)
        )
    }
}

/// Counters reported by a completed sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepSummary {
    /// Bins flushed, including empty ones
    pub bins: usize,
    /// Rows handed to the sink
    pub rows: usize,
    /// Samples counted across all sources
    pub samples: u64,
}

/// In-memory sink holding every source's rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedHistogram {
    rows: BTreeMap<SourceId, Vec<BinRow>>,
}

impl CollectedHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows emitted for `source`, in ascending bound order
    pub fn rows(&self, source: SourceId) -> &[BinRow] {
        self.rows.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sources that received at least one row
    pub fn sources(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.rows.keys().copied()
    }

    /// Lower bounds emitted for `source`
    pub fn bounds(&self, source: SourceId) -> Vec<f64> {
        self.rows(source).iter().map(|row| row.lower).collect()
    }

    /// Sum of the counts emitted for `source`
    pub fn total(&self, source: SourceId) -> u64 {
        self.rows(source).iter().map(|row| row.count).sum()
    }

    /// Render one source's rows in the text output format
    pub fn render(&self, source: SourceId) -> String {
        self.rows(source)
            .iter()
            .map(|row| format!("{row}\n"))
            .collect()
    }
}

impl BinSink for CollectedHistogram {
    fn emit(&mut self, source: SourceId, row: BinRow) -> Result<()> {
        self.rows.entry(source).or_default().push(row);
        Ok(())
    }
}
