//! End-to-end histogram run: extract, sort, estimate, bin, write
//!
//! Every input is read and validated before any output is created, so a
//! malformed line or a degenerate bin width leaves no `.hist` files behind.

use crate::config::HistConfig;
use crate::extract::ValueExtractor;
use crate::sink::SinkRouter;
use robust_core::{Result, Sample, SamplePool, SortedPool, SourceId};
use robust_histogram::{
    BinAggregator, BinSink, BinStatistics, BinWidthRule, FreedmanDiaconisRule, SweepSummary,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of a successful run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    /// Statistics behind the bin width
    pub stats: BinStatistics,
    /// Counters from the aggregation sweep
    pub summary: SweepSummary,
    /// Number of sources that were binned
    pub sources: usize,
}

/// A configured histogram run
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: HistConfig,
    extractor: ValueExtractor,
}

impl Pipeline {
    /// Validate `config` and prepare a run
    pub fn new(config: HistConfig) -> Result<Self> {
        let extractor = ValueExtractor::from_config(&config)?;
        Ok(Self { config, extractor })
    }

    pub fn config(&self) -> &HistConfig {
        &self.config
    }

    /// Extract every input file into one sorted pool
    ///
    /// File `i` becomes `SourceId::new(i)`. Sources whose values were all
    /// filtered out stay registered so they still receive output.
    pub fn ingest_files<P>(&self, inputs: &[P]) -> Result<SortedPool>
    where
        P: AsRef<Path> + Sync,
    {
        #[cfg(feature = "parallel")]
        let batches: Vec<Vec<Sample>> = inputs
            .par_iter()
            .enumerate()
            .map(|(index, path)| self.extractor.extract_path(path.as_ref(), SourceId::new(index)))
            .collect::<Result<_>>()?;

        #[cfg(not(feature = "parallel"))]
        let batches: Vec<Vec<Sample>> = inputs
            .iter()
            .enumerate()
            .map(|(index, path)| self.extractor.extract_path(path.as_ref(), SourceId::new(index)))
            .collect::<Result<_>>()?;

        let mut pool = SamplePool::with_capacity(batches.iter().map(Vec::len).sum());
        for (index, batch) in batches.into_iter().enumerate() {
            pool.register_source(SourceId::new(index));
            pool.extend(batch)?;
        }
        Ok(pool.sort())
    }

    /// Extract a single stream as source 0
    pub fn ingest_reader<R: BufRead>(&self, reader: R, origin: &str) -> Result<SortedPool> {
        let source = SourceId::default();
        let mut pool = SamplePool::new();
        pool.register_source(source);
        pool.extend(self.extractor.extract(reader, source, origin)?)?;
        Ok(pool.sort())
    }

    /// Compute the bin width, writing the statistics report when verbose
    ///
    /// The report is written before the width is validated, so a degenerate
    /// pool still shows the numbers that made it degenerate.
    pub fn estimate<W>(&self, pool: &SortedPool, diagnostics: &mut W) -> Result<BinStatistics>
    where
        W: Write + ?Sized,
    {
        let rule = FreedmanDiaconisRule;
        let stats = rule.statistics(pool)?;
        if self.config.verbose {
            stats.write_report(diagnostics)?;
        }
        stats.validate()?;
        info!(
            "{} bin width {} from {} samples",
            rule.name(),
            stats.bin_width,
            stats.n
        );
        Ok(stats)
    }

    /// Sweep `pool` into `sink` with the configured empty-bin policy
    pub fn bin<S>(
        &self,
        pool: &SortedPool,
        stats: &BinStatistics,
        sink: &mut S,
    ) -> Result<SweepSummary>
    where
        S: BinSink + ?Sized,
    {
        BinAggregator::from_statistics(stats)?
            .with_policy(self.config.empty_bins)
            .sweep(pool, sink)
    }

    /// Run over input files, writing `<input>.hist` for each
    ///
    /// With no inputs, reads standard input and writes standard output.
    pub fn run<W>(&self, inputs: &[PathBuf], diagnostics: &mut W) -> Result<RunReport>
    where
        W: Write + ?Sized,
    {
        let pool = if inputs.is_empty() {
            let stdin = io::stdin();
            self.ingest_reader(stdin.lock(), "<stdin>")?
        } else {
            self.ingest_files(inputs)?
        };

        let stats = self.estimate(&pool, diagnostics)?;

        let mut router = if inputs.is_empty() {
            SinkRouter::stdout()
        } else {
            SinkRouter::for_files(inputs)?
        };
        let summary = self.bin(&pool, &stats, &mut router)?;
        router.finish()?;

        debug!("Wrote {} rows for {} sources", summary.rows, pool.sources().len());
        Ok(RunReport {
            stats,
            summary,
            sources: pool.sources().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robust_core::Error;
    use robust_histogram::{BinRow, CollectedHistogram, EmptyBinPolicy};
    use std::io::Cursor;

    fn pipeline(config: HistConfig) -> Pipeline {
        Pipeline::new(config).unwrap()
    }

    #[test]
    fn test_reader_run_one_through_eight() {
        let p = pipeline(HistConfig::default());
        let pool = p.ingest_reader(Cursor::new("1\n2\n3\n4\n5\n6\n7\n8\n"), "test").unwrap();

        let stats = p.estimate(&pool, &mut io::sink()).unwrap();
        let mut hist = CollectedHistogram::new();
        let summary = p.bin(&pool, &stats, &mut hist).unwrap();

        assert_eq!(
            hist.rows(SourceId::new(0)),
            &[BinRow::new(1.0, 4), BinRow::new(5.0, 4)]
        );
        assert_eq!(summary.samples, 8);
    }

    #[test]
    fn test_verbose_report() {
        let p = pipeline(HistConfig::default().with_verbose(true));
        let pool = p.ingest_reader(Cursor::new("1\n2\n3\n4\n5\n6\n7\n8\n"), "test").unwrap();

        let mut report = Vec::new();
        p.estimate(&pool, &mut report).unwrap();
        let report = String::from_utf8(report).unwrap();
        assert_eq!(
            report,
            "n = 8\np25 = 3\np75 = 7\nbin_width = 4\nmin = 1\nmax = 8\nnum_bins = 1.75\n"
        );
    }

    #[test]
    fn test_quiet_by_default() {
        let p = pipeline(HistConfig::default());
        let pool = p.ingest_reader(Cursor::new("1\n2\n3\n4\n"), "test").unwrap();

        let mut report = Vec::new();
        p.estimate(&pool, &mut report).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_verbose_report_precedes_degenerate_error() {
        let p = pipeline(HistConfig::default().with_verbose(true));
        let pool = p.ingest_reader(Cursor::new("3\n3\n3\n3\n3\n"), "test").unwrap();

        let mut report = Vec::new();
        let err = p.estimate(&pool, &mut report).unwrap_err();
        assert!(matches!(err, Error::DegenerateBinWidth(_)));
        assert!(String::from_utf8(report).unwrap().contains("bin_width = 0\n"));
    }

    #[test]
    fn test_filtered_to_nothing_is_degenerate() {
        let p = pipeline(HistConfig::default().with_minimum(100.0));
        let pool = p.ingest_reader(Cursor::new("1\n2\n3\n"), "test").unwrap();
        assert!(pool.is_empty());
        assert!(matches!(
            p.estimate(&pool, &mut io::sink()),
            Err(Error::DegenerateBinWidth(_))
        ));
    }

    #[test]
    fn test_policy_from_config() {
        let input = "0\n0\n0\n0\n1\n1\n1\n1\n100\n";
        let a = SourceId::new(0);

        let skip = pipeline(HistConfig::default());
        let pool = skip.ingest_reader(Cursor::new(input), "test").unwrap();
        let stats = skip.estimate(&pool, &mut io::sink()).unwrap();

        let mut skipped = CollectedHistogram::new();
        skip.bin(&pool, &stats, &mut skipped).unwrap();
        assert_eq!(skipped.rows(a).len(), 3);
        assert_eq!(skipped.total(a), 9);

        let emit = pipeline(HistConfig::default().with_empty_bins(EmptyBinPolicy::Emit));
        let mut emitted = CollectedHistogram::new();
        let summary = emit.bin(&pool, &stats, &mut emitted).unwrap();
        assert_eq!(emitted.rows(a).len(), summary.bins);
        assert!(summary.bins > 100);
        assert_eq!(emitted.total(a), 9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            Pipeline::new(HistConfig::default().with_column(0)),
            Err(Error::InvalidParameter(_))
        ));
    }
}
