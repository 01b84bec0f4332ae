//! Samples tagged with their source, and the pool that collects them
//!
//! A [`SamplePool`] is filled during ingestion and then consumed by
//! [`SamplePool::sort`], which yields a read-only [`SortedPool`]. The sorted
//! pool is the only form the width estimator and the aggregator accept, so
//! the ascending-order invariant is enforced by the type system.

use crate::error::{Error, Result};
use crate::math::percentile_index;
use std::collections::BTreeSet;
use std::fmt;

/// Stable identifier of one input source
///
/// Ids are assigned densely in the order sources are given, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceId(usize);

impl SourceId {
    /// Create a source id from its position in the input list
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of this source in the input list
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source {}", self.0)
    }
}

impl From<usize> for SourceId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// One numeric observation and the source that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub source: SourceId,
}

impl Sample {
    pub fn new(value: f64, source: SourceId) -> Self {
        Self { value, source }
    }
}

/// Unsorted collection of samples from every source
#[derive(Debug, Clone, Default)]
pub struct SamplePool {
    samples: Vec<Sample>,
    sources: BTreeSet<SourceId>,
}

impl SamplePool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty pool with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            sources: BTreeSet::new(),
        }
    }

    /// Register a source that may contribute no samples
    ///
    /// Registered sources take part in every flush even when all of their
    /// values were filtered out.
    pub fn register_source(&mut self, source: SourceId) {
        self.sources.insert(source);
    }

    /// Add one sample, registering its source
    pub fn push(&mut self, sample: Sample) -> Result<()> {
        if !sample.value.is_finite() {
            return Err(Error::InvalidInput(format!(
                "{} produced a non-finite value: {}",
                sample.source, sample.value
            )));
        }
        self.sources.insert(sample.source);
        self.samples.push(sample);
        Ok(())
    }

    /// Add every sample from an iterator
    pub fn extend<I>(&mut self, samples: I) -> Result<()>
    where
        I: IntoIterator<Item = Sample>,
    {
        for sample in samples {
            self.push(sample)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Registered sources in ascending id order
    pub fn sources(&self) -> &BTreeSet<SourceId> {
        &self.sources
    }

    /// Sort by value, ending the ingestion phase
    ///
    /// Ties keep no particular relative order.
    pub fn sort(mut self) -> SortedPool {
        self.samples.sort_unstable_by(|a, b| a.value.total_cmp(&b.value));
        SortedPool {
            samples: self.samples,
            sources: self.sources,
        }
    }
}

/// Read-only pool sorted by ascending value
#[derive(Debug, Clone, Default)]
pub struct SortedPool {
    samples: Vec<Sample>,
    sources: BTreeSet<SourceId>,
}

impl SortedPool {
    /// Samples in ascending value order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Registered sources in ascending id order
    pub fn sources(&self) -> &BTreeSet<SourceId> {
        &self.sources
    }

    /// Smallest value in the pool
    pub fn min(&self) -> Option<f64> {
        self.samples.first().map(|s| s.value)
    }

    /// Largest value in the pool
    pub fn max(&self) -> Option<f64> {
        self.samples.last().map(|s| s.value)
    }

    /// Index-based percentile: the value at `floor(percent * n / 100)`
    pub fn percentile(&self, percent: usize) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let index = percentile_index(self.samples.len(), percent);
        Some(self.samples[index].value)
    }

    /// Number of samples contributed by `source`
    pub fn count_for(&self, source: SourceId) -> usize {
        self.samples.iter().filter(|s| s.source == source).count()
    }
}

impl<'a> IntoIterator for &'a SortedPool {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
