use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned when loading a call-record table.
///
/// Every variant is fatal for the load attempt that produced it; no partial table is returned
/// and nothing is retried. Row-level problems (unparsable timestamps, missing coordinates) are
/// never reported here, those rows are dropped during cleansing.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source path does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The source exists but could not be decompressed or parsed as delimited text.
    #[error("error loading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ReadFailure,
    },

    /// One or more required columns are absent from the header row.
    #[error("missing expected columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },
}

impl LoadError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: impl Into<ReadFailure>) -> Self {
        LoadError::Read {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Underlying cause of a [`LoadError::Read`].
#[derive(Debug, Error)]
pub enum ReadFailure {
    /// I/O failure while opening or decompressing the source.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text failure (malformed record, invalid UTF-8, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Error returned when filter criteria cannot be decoded.
#[derive(Debug, Error)]
pub enum CriteriaError {
    #[error("invalid criteria json: {0}")]
    Json(#[from] serde_json::Error),
}
