//! Histograms of a text column with automatic, shared bin widths
//!
//! `robust-hist` reads one whitespace-delimited column from each input,
//! pools the values of every input, picks a bin width with the index-based
//! Freedman-Diaconis rule, and writes one histogram per input. All inputs
//! share the same bin bounds, so their histograms can be compared row by
//! row.
//!
//! The binning itself lives in [`robust_histogram`]; this crate adds the
//! text extraction, the output routing and the command-line pipeline.
//!
//! # Example
//!
//! ```rust
//! use robust_hist::{HistConfig, Pipeline};
//! use robust_histogram::CollectedHistogram;
//! use robust_core::SourceId;
//! use std::io::Cursor;
//!
//! let pipeline = Pipeline::new(HistConfig::default()).unwrap();
//! let pool = pipeline
//!     .ingest_reader(Cursor::new("1\n2\n3\n4\n5\n6\n7\n8\n"), "example")
//!     .unwrap();
//! let stats = pipeline.estimate(&pool, &mut std::io::sink()).unwrap();
//!
//! let mut hist = CollectedHistogram::new();
//! pipeline.bin(&pool, &stats, &mut hist).unwrap();
//! assert_eq!(hist.render(SourceId::new(0)), "1 4\n5 4\n");
//! ```

pub mod config;
pub mod extract;
pub mod pipeline;
pub mod sink;

pub use config::HistConfig;
pub use extract::{ValueExtractor, ValueRange};
pub use pipeline::{Pipeline, RunReport};
pub use sink::{output_path, SinkRouter, OUTPUT_SUFFIX};

pub use robust_core::{Error, Result};
