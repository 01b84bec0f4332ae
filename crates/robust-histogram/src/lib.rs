//! Automatic-width histograms over multiple sources
//!
//! This crate turns a sorted pool of samples, each tagged with the source it
//! came from, into per-source histograms that share one set of bin
//! boundaries. The bin width is chosen from the pooled data with an
//! index-based Freedman-Diaconis rule, and the samples are binned in a
//! single forward sweep.
//!
//! # Key Features
//!
//! - **Automatic bin width**: `2 * IQR / cbrt(n)` with index-based quartiles
//! - **Aligned output**: every source uses the same bin bounds
//! - **Streaming sweep**: bins are flushed in ascending order as the sweep
//!   crosses each boundary, so rows can go straight to a writer
//! - **Empty bin policy**: skip zero-count rows or emit every bin
//!
//! # Examples
//!
//! ```rust
//! use robust_core::{Sample, SamplePool, SourceId};
//! use robust_histogram::{histogram, BinRow, EmptyBinPolicy};
//!
//! let mut pool = SamplePool::new();
//! for value in 1..=8 {
//!     pool.push(Sample::new(value as f64, SourceId::new(0))).unwrap();
//! }
//!
//! let (stats, hist) = histogram(&pool.sort(), EmptyBinPolicy::Skip).unwrap();
//! assert!((stats.bin_width - 4.0).abs() < 1e-12);
//! assert_eq!(
//!     hist.rows(SourceId::new(0)),
//!     &[BinRow::new(1.0, 4), BinRow::new(5.0, 4)]
//! );
//! ```
//!
//! ## Streaming into a custom sink
//!
//! ```rust
//! use robust_core::{Result, Sample, SamplePool, SourceId};
//! use robust_histogram::{BinAggregator, BinRow, BinSink, BinWidthRule, FreedmanDiaconisRule};
//!
//! struct Printer(Vec<String>);
//!
//! impl BinSink for Printer {
//!     fn emit(&mut self, source: SourceId, row: BinRow) -> Result<()> {
//!         self.0.push(format!("{}: {}", source.index(), row));
//!         Ok(())
//!     }
//! }
//!
//! let mut pool = SamplePool::new();
//! for (i, value) in [1.0, 1.0, 1.0, 1.0, 10.0, 10.0, 10.0, 10.0].into_iter().enumerate() {
//!     pool.push(Sample::new(value, SourceId::new(i / 4))).unwrap();
//! }
//! let pool = pool.sort();
//!
//! let stats = FreedmanDiaconisRule.estimate(&pool).unwrap();
//! let mut printer = Printer(Vec::new());
//! BinAggregator::from_statistics(&stats)
//!     .unwrap()
//!     .sweep(&pool, &mut printer)
//!     .unwrap();
//!
//! assert_eq!(printer.0, vec!["0: 1 4", "1: 10 4"]);
//! ```

pub mod aggregator;
pub mod builders;
pub mod format;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use aggregator::BinAggregator;
pub use builders::FreedmanDiaconisRule;
pub use format::{format_bound, GeneralFloat};
pub use traits::{BinSink, BinWidthRule};
pub use types::{BinRow, BinStatistics, CollectedHistogram, EmptyBinPolicy, SweepSummary};

pub use robust_core::Result;

// Convenience functions
/// Estimate the bin width with the Freedman-Diaconis rule and bin `pool` in memory
pub fn histogram(
    pool: &robust_core::SortedPool,
    policy: EmptyBinPolicy,
) -> Result<(BinStatistics, CollectedHistogram)> {
    let stats = FreedmanDiaconisRule.estimate(pool)?;
    let mut collected = CollectedHistogram::new();
    BinAggregator::from_statistics(&stats)?
        .with_policy(policy)
        .sweep(pool, &mut collected)?;
    Ok((stats, collected))
}
