//! Error types and SNAFU context selectors for the query engine.
//!
//! `QueryError` covers caller contract violations on the query surface;
//! `IngestError` covers loading readings from CSV. Context selectors are
//! visible crate-wide so sibling modules can attach context without
//! re-exporting them at the crate root.

use arrow::error::ArrowError;
use snafu::prelude::*;

/// Result alias for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Result alias for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors from [`crate::WeatherQueryEngine`] and [`crate::RecordStore`]
/// operations.
///
/// Both variants are caller contract violations: the engine never retries
/// them and never returns partial results alongside them.
#[derive(Debug, Snafu, Clone, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum QueryError {
    /// An index or `(index, count)` window falls outside the record sequence.
    #[snafu(display(
        "Window starting at {index} with count {count} is outside the {len} available readings"
    ))]
    OutOfRange {
        /// First index requested by the caller.
        index: i64,
        /// Number of readings requested (1 for single-reading lookups).
        count: i64,
        /// Number of readings held by the store.
        len: usize,
    },

    /// A semantic precondition on an argument was violated.
    #[snafu(display("Invalid {argument}: {reason}"))]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Human-readable description of the violated precondition.
        reason: String,
    },
}

impl QueryError {
    /// True for [`QueryError::OutOfRange`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, QueryError::OutOfRange { .. })
    }

    /// True for [`QueryError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, QueryError::InvalidArgument { .. })
    }
}

/// Errors raised while loading readings from a CSV source.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum IngestError {
    /// The source file could not be opened.
    #[snafu(display("Cannot open readings file {path}: {source}"))]
    Open {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The CSV reader rejected the input (wrong field count, unparseable
    /// number, I/O failure mid-stream).
    #[snafu(display("Malformed readings CSV: {source}"))]
    Csv {
        /// Underlying Arrow CSV error.
        source: ArrowError,
    },

    /// A decoded column did not have the Arrow type the schema declares.
    #[snafu(display("Column {column} was not decoded as the expected type"))]
    UnexpectedColumnType {
        /// Column name from the readings schema.
        column: &'static str,
    },

    /// A numeric field was empty.
    #[snafu(display("Row {row} has no value for {column}"))]
    MissingValue {
        /// Zero-based data row (the header is not counted).
        row: usize,
        /// Column name from the readings schema.
        column: &'static str,
    },
}
