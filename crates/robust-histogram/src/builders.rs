//! Bin width rules

use crate::traits::BinWidthRule;
use crate::types::BinStatistics;
use robust_core::{Error, Result, SortedPool};
use tracing::{debug, instrument};

/// Freedman-Diaconis rule for optimal bin width
///
/// Uses the formula: h = 2 * IQR * n^(-1/3)
/// where IQR is the interquartile range.
///
/// The quartiles are index-based rather than interpolated: `q1` is the
/// sample at `floor(n / 4)` and `q3` the sample at `floor(3n / 4)` of the
/// sorted pool. This is crude but deterministic, and keeps the output
/// identical across implementations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreedmanDiaconisRule;

impl BinWidthRule for FreedmanDiaconisRule {
    #[instrument(skip(self, pool), fields(n = pool.len()))]
    fn statistics(&self, pool: &SortedPool) -> Result<BinStatistics> {
        let (Some(min), Some(max)) = (pool.min(), pool.max()) else {
            return Err(Error::empty_pool());
        };
        let (Some(p25), Some(p75)) = (pool.percentile(25), pool.percentile(75)) else {
            return Err(Error::empty_pool());
        };

        let n = pool.len();
        let bin_width = 2.0 * (p75 - p25) / (n as f64).cbrt();

        let stats = BinStatistics {
            n,
            p25,
            p75,
            bin_width,
            min,
            max,
        };
        debug!("Freedman-Diaconis: {}", stats);
        Ok(stats)
    }

    fn name(&self) -> &str {
        "Freedman-Diaconis"
    }
}
