//! Path-based loading of call tables.
//!
//! [`load`] runs the whole load sequence:
//!
//! 1. open the source (`NotFound` if absent) and pick a decoder per [`Compression`]
//! 2. read delimited records and check the required columns
//! 3. derive `Category` from `title` unless the source already carries it
//! 4. parse `timeStamp` best-effort, then drop rows without a timestamp or coordinates
//!
//! If an [`LoadObserver`] is configured, success/failure/alerts are reported to it.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::calls;
use crate::error::{LoadError, LoadResult, ReadFailure};
use crate::processing::{cleanse, parse_timestamps, with_category, DEFAULT_TIMESTAMP_FORMATS};
use crate::types::DataSet;

use super::compression::{self, Compression};
use super::csv::read_calls_from_reader;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Options controlling [`load`].
///
/// Use [`Default`] for gzip-or-plain, comma-delimited sources.
#[derive(Clone)]
pub struct LoadOptions {
    /// Source compression; [`Compression::Auto`] sniffs gzip.
    pub compression: Compression,
    /// Field delimiter byte.
    pub delimiter: u8,
    /// `chrono` format strings tried, in order, when parsing `timeStamp`.
    pub timestamp_formats: Vec<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("compression", &self.compression)
            .field("delimiter", &(self.delimiter as char))
            .field("timestamp_formats", &self.timestamp_formats)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            compression: Compression::Auto,
            delimiter: b',',
            timestamp_formats: DEFAULT_TIMESTAMP_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a call table from `path`.
///
/// Fails with [`LoadError::NotFound`] if the path does not exist, [`LoadError::Read`] if it
/// cannot be decompressed or parsed, and [`LoadError::Schema`] if required columns are
/// missing. Rows with an unparsable timestamp or missing coordinates are dropped silently.
///
/// Every row of the returned table has a date-time `timeStamp`, numeric `lat`/`lng`, and a
/// `Category` column.
///
/// # Examples
///
/// ```no_run
/// use emergency_call_data::ingestion::{load, LoadOptions};
///
/// # fn main() -> Result<(), emergency_call_data::LoadError> {
/// let table = load("compressed_data.csv.gz", &LoadOptions::default())?;
/// println!("rows={}", table.row_count());
/// # Ok(())
/// # }
/// ```
///
/// Tab-delimited plain text with an observer:
///
/// ```no_run
/// use std::sync::Arc;
///
/// use emergency_call_data::ingestion::{load, Compression, LoadOptions, TracingObserver};
///
/// # fn main() -> Result<(), emergency_call_data::LoadError> {
/// let opts = LoadOptions {
///     compression: Compression::None,
///     delimiter: b'\t',
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
/// let table = load("calls.tsv", &opts)?;
/// # let _ = table;
/// # Ok(())
/// # }
/// ```
pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<DataSet> {
    let path = path.as_ref();
    let ctx = LoadContext {
        path: path.to_path_buf(),
        compression: options.compression,
    };

    let result = load_uncached(path, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(&ctx, LoadStats { rows: ds.row_count() }),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn load_uncached(path: &Path, options: &LoadOptions) -> LoadResult<DataSet> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::read(path, e),
    })?;
    let reader =
        compression::decoder(file, options.compression).map_err(|e| LoadError::read(path, e))?;

    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(reader);
    let raw = read_calls_from_reader(&mut rdr, path)?;

    let absent: Vec<&str> = calls::OPTIONAL_COLUMNS
        .iter()
        .copied()
        .filter(|col| !raw.schema.contains(col))
        .collect();
    if !absent.is_empty() {
        tracing::debug!(path = %path.display(), ?absent, "optional columns absent");
    }

    let categorized = with_category(&raw);
    let parsed = parse_timestamps(&categorized, options.timestamp_formats.as_slice());
    let table = cleanse(&parsed);
    tracing::debug!(
        path = %path.display(),
        rows = table.row_count(),
        "call table normalized"
    );
    Ok(table)
}

fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e {
        LoadError::NotFound { .. } => LoadSeverity::Critical,
        LoadError::Read { source, .. } => match source {
            ReadFailure::Io(_) => LoadSeverity::Critical,
            ReadFailure::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
                _ => LoadSeverity::Error,
            },
        },
        LoadError::Schema { .. } => LoadSeverity::Error,
    }
}
