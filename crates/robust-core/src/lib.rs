//! Core types for robust histogram construction
//!
//! This crate provides the foundation shared by the rest of the workspace:
//!
//! - [`Error`] / [`Result`]: the unified error type
//! - [`Sample`], [`SourceId`]: one observation tagged with its input source
//! - [`SamplePool`] / [`SortedPool`]: the ingestion buffer and its sorted,
//!   read-only form
//! - [`math`]: index-based percentile helpers
//!
//! # Example
//!
//! ```rust
//! use robust_core::{Sample, SamplePool, SourceId};
//!
//! let mut pool = SamplePool::new();
//! for value in [4.0, 1.0, 3.0, 2.0] {
//!     pool.push(Sample::new(value, SourceId::new(0))).unwrap();
//! }
//! let sorted = pool.sort();
//!
//! assert_eq!(sorted.min(), Some(1.0));
//! assert_eq!(sorted.percentile(75), Some(4.0));
//! ```

pub mod error;
pub mod math;
pub mod sample;

pub use error::{Error, Result};
pub use sample::{Sample, SamplePool, SortedPool, SourceId};
