//! Error types for histogram construction
//!
//! Provides a unified error type for all robust-hist crates.

use thiserror::Error;

/// Core error type for histogram operations
///
/// Every variant is fatal: nothing in the pipeline recovers from or retries
/// an error, it is propagated to the caller unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested column of an input line is missing or not a number
    #[error("{origin}:{line_number}: column {column} is not a number in: {line}")]
    MalformedValue {
        /// Human-readable name of the input (file name or `<stdin>`)
        origin: String,
        /// One-based line number within the input
        line_number: usize,
        /// One-based column that was requested
        column: usize,
        /// The raw text of the offending line
        line: String,
    },

    /// An input could not be opened or read, or an output could not be created
    #[error("Cannot open or read {path}: {source}")]
    ChannelOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The computed bin width cannot be used to bin the data
    #[error("Degenerate bin width: {0}")]
    DegenerateBinWidth(String),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error (for writing output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for an input or output channel that failed to open
    pub fn channel_open(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ChannelOpen {
            path: path.into(),
            source,
        }
    }

    /// Create an error for an empty sample pool
    pub fn empty_pool() -> Self {
        Self::DegenerateBinWidth("no samples to bin".to_string())
    }
}
