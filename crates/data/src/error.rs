//! Error types for loading the flow feed and the centroid table.
//!
//! Only structurally bad input is an error here. Data-quality gaps such as
//! unknown country codes are filtered during enrichment, never raised.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading input data.
#[derive(Debug, Error)]
pub enum DataError {
    /// A file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A feed row failed to parse.
    #[error("malformed flow row {row}: {source}")]
    MalformedRow {
        /// 1-based line number in the feed, counting the header.
        row: usize,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A feed row carried a negative or non-finite traded value.
    #[error("flow row {row} has invalid traded value {value}")]
    InvalidValue {
        /// 1-based line number in the feed, counting the header.
        row: usize,
        /// The offending value.
        value: f64,
    },

    /// The centroid table was not a valid `{iso3: [lng, lat]}` JSON map.
    #[error("invalid centroid table: {0}")]
    CentroidTable(#[from] serde_json::Error),
}

impl DataError {
    /// Creates a read error for the given path.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for data-loading operations.
pub type Result<T> = std::result::Result<T, DataError>;
