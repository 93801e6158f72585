//! `emergency-call-data` loads tables of emergency (911) call records into an in-memory
//! [`types::DataSet`] and serves the filtered, sampled, and summarized views a dashboard draws
//! from.
//!
//! The primary entrypoint is [`ingestion::load`] (or [`pipeline::CallPipeline`], which adds a
//! path-keyed [`ingestion::TableCache`]).
//!
//! ## What a load does
//!
//! - reads a gzip-compressed (or plain) delimited file with a header row
//! - requires the columns `lat`, `lng`, `title`, `timeStamp`; `desc`, `zip`, `twp`, `addr`,
//!   `e` and `Category` are used when present, other columns are kept as text
//! - derives `Category` from `title` (text before the first `:`) unless the source has one
//! - parses `timeStamp` best-effort and drops rows lacking a timestamp or coordinates
//!
//! Failures are [`LoadError::NotFound`], [`LoadError::Read`] or [`LoadError::Schema`]; all
//! of them end the load attempt. Row-level problems never raise.
//!
//! ## Example: load → criteria → selection
//!
//! ```no_run
//! use emergency_call_data::ingestion::LoadOptions;
//! use emergency_call_data::pipeline::CallPipeline;
//! use emergency_call_data::processing::FilterCriteria;
//! use emergency_call_data::summary;
//!
//! # fn main() -> Result<(), emergency_call_data::LoadError> {
//! let mut pipeline = CallPipeline::new(LoadOptions::default());
//! let table = pipeline.load("compressed_data.csv.gz")?;
//!
//! // Dashboard defaults: every category over the full date span.
//! let criteria = FilterCriteria::all(&table).expect("table has timestamps");
//! let selection = pipeline.select("compressed_data.csv.gz", &criteria)?;
//!
//! if let Some(notice) = selection.notice() {
//!     eprintln!("{notice}");
//! } else {
//!     println!("heat points: {}", summary::heat_points(&selection.filtered).len());
//!     println!("by weekday: {:?}", summary::day_of_week_counts(&selection.filtered));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: loading, decompression, observers, and the table cache
//! - [`processing`]: category derivation, timestamp parse/cleanse, filter, sample, reduce
//! - [`summary`]: aggregates for presentation layers
//! - [`pipeline`]: the `criteria → filter → sample` driver
//! - [`calls`]: call-record column names and the category rule
//! - [`types`]: schema + in-memory dataset types
//! - [`error`]: error types

pub mod calls;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod summary;
pub mod types;

pub use error::{CriteriaError, LoadError, LoadResult, ReadFailure};
