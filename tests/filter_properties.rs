//! Property tests for value filtering through the pipeline

use proptest::prelude::*;
use robust_core::SourceId;
use robust_hist::{HistConfig, Pipeline};
use robust_histogram::{CollectedHistogram, EmptyBinPolicy};
use std::io::{self, Cursor};

fn input_of(values: &[i32]) -> String {
    values.iter().map(|v| format!("{v}\n")).collect()
}

proptest! {
    // Property: values equal to either bound are kept, values outside are dropped
    #[test]
    fn prop_filter_bounds_are_inclusive(
        mut values in prop::collection::vec(-100i32..100, 0..200),
        minimum in -80i32..80,
        span in 0i32..80,
    ) {
        let maximum = minimum + span;
        values.push(minimum);
        values.push(maximum);

        let config = HistConfig::default()
            .with_minimum(f64::from(minimum))
            .with_maximum(f64::from(maximum));
        let pipeline = Pipeline::new(config).unwrap();
        let pool = pipeline.ingest_reader(Cursor::new(input_of(&values)), "values").unwrap();

        let kept = values.iter().filter(|&&v| v >= minimum && v <= maximum).count();
        prop_assert_eq!(pool.len(), kept);
        prop_assert_eq!(pool.min(), Some(f64::from(minimum)));
        prop_assert_eq!(pool.max(), Some(f64::from(maximum)));
    }

    // Property: emitted counts add up to the number of values that passed the filter
    #[test]
    fn prop_emitted_counts_match_filtered_values(
        values in prop::collection::vec(-100i32..100, 4..200),
        minimum in -80i32..0,
        span in 20i32..100,
    ) {
        let maximum = minimum + span;
        let kept = values.iter().filter(|&&v| v >= minimum && v <= maximum).count() as u64;

        for policy in [EmptyBinPolicy::Skip, EmptyBinPolicy::Emit] {
            let config = HistConfig::default()
                .with_minimum(f64::from(minimum))
                .with_maximum(f64::from(maximum))
                .with_empty_bins(policy);
            let pipeline = Pipeline::new(config).unwrap();
            let pool = pipeline.ingest_reader(Cursor::new(input_of(&values)), "values").unwrap();

            let stats = pipeline.estimate(&pool, &mut io::sink());
            prop_assume!(stats.is_ok());
            let stats = stats.unwrap();

            let mut hist = CollectedHistogram::new();
            let summary = pipeline.bin(&pool, &stats, &mut hist).unwrap();
            prop_assert_eq!(summary.samples, kept);
            prop_assert_eq!(hist.total(SourceId::new(0)), kept);
        }
    }
}
