//! Single-pass binning of a sorted sample pool
//!
//! The aggregator walks the pool once in ascending order. It keeps one
//! running count per source for the current bin and flushes every source's
//! count whenever a sample crosses into the next bin, so all sources share
//! the same bin boundaries.

use crate::traits::BinSink;
use crate::types::{BinRow, BinStatistics, EmptyBinPolicy, SweepSummary};
use robust_core::{Error, Result, SortedPool, SourceId};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument, trace};

/// Streams sorted samples into fixed-width bins
#[derive(Debug, Clone, Copy)]
pub struct BinAggregator {
    bin_width: f64,
    policy: EmptyBinPolicy,
}

impl BinAggregator {
    /// Create an aggregator with the given bin width
    pub fn new(bin_width: f64) -> Result<Self> {
        if !(bin_width.is_finite() && bin_width > 0.0) {
            return Err(Error::DegenerateBinWidth(format!(
                "bin width {bin_width} is not a positive finite number"
            )));
        }
        Ok(Self {
            bin_width,
            policy: EmptyBinPolicy::default(),
        })
    }

    /// Create an aggregator from validated statistics
    pub fn from_statistics(stats: &BinStatistics) -> Result<Self> {
        stats.validate()?;
        Self::new(stats.bin_width)
    }

    /// Set the policy for zero-count rows
    pub fn with_policy(mut self, policy: EmptyBinPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bin every sample of `pool`, handing rows to `sink`
    ///
    /// The first bin starts at the smallest sample and bin `k` starts at
    /// `min + k * bin_width`. Bins are half-open, so a value equal to the next
    /// bin's lower bound is counted in the next bin. The final bin is flushed
    /// exactly once after the last sample.
    ///
    /// Under [`EmptyBinPolicy::Skip`] runs of empty bins are jumped over, so
    /// the cost depends on the number of samples and not on how far apart
    /// they are.
    #[instrument(skip(self, pool, sink), fields(n = pool.len(), bin_width = self.bin_width))]
    pub fn sweep<S>(&self, pool: &SortedPool, sink: &mut S) -> Result<SweepSummary>
    where
        S: BinSink + ?Sized,
    {
        let Some(first) = pool.min() else {
            return Err(Error::empty_pool());
        };

        let mut cursor = BinCursor::new(first, self.bin_width, pool.sources())?;
        let mut summary = SweepSummary::default();

        for sample in pool {
            if sample.value >= cursor.next {
                cursor.flush(self.policy, sink, &mut summary)?;
                let target = cursor.locate(sample.value)?;
                if self.policy.should_emit(0) {
                    for index in cursor.index + 1..target {
                        cursor.seek(index)?;
                        cursor.flush(self.policy, sink, &mut summary)?;
                    }
                } else {
                    let skipped = target - cursor.index - 1;
                    if skipped > 0 {
                        trace!("Skipping {} empty bins after {}", skipped, cursor.bottom);
                    }
                    summary.bins += skipped as usize;
                }
                cursor.seek(target)?;
            }
            cursor.count(sample.source)?;
            summary.samples += 1;
        }
        cursor.flush(self.policy, sink, &mut summary)?;

        debug!(
            "Sweep complete: {} bins, {} rows, {} samples",
            summary.bins, summary.rows, summary.samples
        );
        Ok(summary)
    }
}

/// Largest bin index whose successor is still exactly representable
const MAX_BIN_INDEX: f64 = 9_007_199_254_740_992.0;

/// Mutable state of a sweep
struct BinCursor {
    origin: f64,
    width: f64,
    index: u64,
    bottom: f64,
    next: f64,
    counts: BTreeMap<SourceId, u64>,
}

impl BinCursor {
    fn new(origin: f64, width: f64, sources: &BTreeSet<SourceId>) -> Result<Self> {
        let mut cursor = Self {
            origin,
            width,
            index: 0,
            bottom: origin,
            next: origin,
            counts: sources.iter().map(|&source| (source, 0)).collect(),
        };
        cursor.seek(0)?;
        Ok(cursor)
    }

    fn bound(&self, index: u64) -> f64 {
        self.origin + index as f64 * self.width
    }

    fn stalled(&self, near: f64) -> Error {
        Error::DegenerateBinWidth(format!(
            "bin width {} is too small to separate values near {near}",
            self.width
        ))
    }

    /// Make bin `index` the current bin
    fn seek(&mut self, index: u64) -> Result<()> {
        let bottom = self.bound(index);
        let next = self.bound(index + 1);
        if next <= bottom {
            return Err(self.stalled(bottom));
        }
        self.index = index;
        self.bottom = bottom;
        self.next = next;
        Ok(())
    }

    /// Index of the bin holding `value`, which must not be below `next`
    fn locate(&self, value: f64) -> Result<u64> {
        let estimate = ((value - self.origin) / self.width).floor();
        if !(estimate < MAX_BIN_INDEX) {
            return Err(self.stalled(value));
        }

        // The division can be off by one in either direction
        let lowest = self.index + 1;
        let mut index = (estimate as u64).max(lowest);
        while index > lowest && self.bound(index) > value {
            index -= 1;
        }
        while self.bound(index + 1) <= value {
            if self.bound(index + 1) <= self.bound(index) {
                return Err(self.stalled(value));
            }
            index += 1;
        }
        Ok(index)
    }

    fn count(&mut self, source: SourceId) -> Result<()> {
        let count = self.counts.get_mut(&source).ok_or_else(|| {
            Error::InvalidInput(format!("{source} is not registered in the pool"))
        })?;
        *count += 1;
        Ok(())
    }

    fn flush<S>(
        &mut self,
        policy: EmptyBinPolicy,
        sink: &mut S,
        summary: &mut SweepSummary,
    ) -> Result<()>
    where
        S: BinSink + ?Sized,
    {
        trace!("Flushing bin at {}", self.bottom);
        for (&source, count) in self.counts.iter_mut() {
            if policy.should_emit(*count) {
                sink.emit(source, BinRow::new(self.bottom, *count))?;
                summary.rows += 1;
            }
            *count = 0;
        }
        summary.bins += 1;
        Ok(())
    }
}
