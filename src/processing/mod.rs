//! In-memory transformations of call tables.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion.
//! Every function returns a new table and leaves its input untouched.
//!
//! - [`with_category`]: derive `Category` from `title`
//! - [`parse_timestamps`] then [`cleanse`]: best-effort timestamp coercion, then dropping of
//!   rows without a timestamp or coordinates
//! - [`filter_calls`]: apply [`FilterCriteria`]; [`filter()`] for arbitrary predicates
//! - [`sample()`]: bounded, optionally seeded row sampling
//! - [`reduce()`]: column reductions (count/sum/mean/min/max)
//!
//! ## Example: criteria → filter → sample
//!
//! ```rust
//! use chrono::NaiveDate;
//! use emergency_call_data::processing::{filter_calls, sample, DateRange, FilterCriteria};
//! use emergency_call_data::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let at = |d: u32| NaiveDate::from_ymd_opt(2016, 1, d).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let schema = Schema::new(vec![
//!     Field::new("Category", DataType::Utf8),
//!     Field::new("timeStamp", DataType::DateTime),
//! ]);
//! let table = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("EMS".to_string()), Value::DateTime(at(1))],
//!         vec![Value::Utf8("Fire".to_string()), Value::DateTime(at(2))],
//!         vec![Value::Utf8("EMS".to_string()), Value::DateTime(at(20))],
//!     ],
//! );
//!
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2016, 1, 10).unwrap(),
//! );
//! let criteria = FilterCriteria::new(["EMS", "Fire"], range);
//! let filtered = filter_calls(&table, &criteria);
//! assert_eq!(filtered.row_count(), 2);
//!
//! let scatter = sample(&filtered, 1, Some(42));
//! assert_eq!(scatter.row_count(), 1);
//! ```

pub mod category;
pub mod cleanse;
pub mod criteria;
pub mod filter;
pub mod reduce;
pub mod sample;

pub use category::with_category;
pub use cleanse::{cleanse, parse_timestamp, parse_timestamps, DEFAULT_TIMESTAMP_FORMATS};
pub use criteria::{DateRange, FilterCriteria, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED};
pub use filter::{filter, filter_calls};
pub use reduce::{reduce, ReduceOp};
pub use sample::sample;
