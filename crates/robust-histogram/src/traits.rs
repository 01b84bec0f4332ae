//! Core traits for histogram building

use crate::types::{BinRow, BinStatistics};
use robust_core::{Result, SortedPool, SourceId};

/// Trait for deriving a bin width from a sorted sample pool
pub trait BinWidthRule {
    /// Compute the width and the statistics it was derived from
    ///
    /// The width is not validated; it may be zero or non-finite for
    /// degenerate pools. Only an empty pool is an error here.
    fn statistics(&self, pool: &SortedPool) -> Result<BinStatistics>;

    /// Compute the statistics and reject widths that cannot drive a sweep
    fn estimate(&self, pool: &SortedPool) -> Result<BinStatistics> {
        let stats = self.statistics(pool)?;
        stats.validate()?;
        Ok(stats)
    }

    /// Name of the rule, for diagnostics
    fn name(&self) -> &str;
}

/// Destination for the rows produced by a sweep
///
/// Rows for a given source arrive in strictly increasing bound order.
pub trait BinSink {
    /// Accept one row for `source`
    fn emit(&mut self, source: SourceId, row: BinRow) -> Result<()>;
}

impl<S: BinSink + ?Sized> BinSink for &mut S {
    fn emit(&mut self, source: SourceId, row: BinRow) -> Result<()> {
        (**self).emit(source, row)
    }
}
