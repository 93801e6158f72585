//! User-selected filter constraints.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::CriteriaError;
use crate::summary;
use crate::types::DataSet;

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `true` if `date` lies in `[start, end]`. An inverted range contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Constraints chosen in the UI: categories, date range, optional year, and the bound on
/// the scatter sample.
///
/// All predicates combine with AND. A year filter narrows the date range, it never widens
/// or replaces it.
///
/// Criteria can arrive as JSON; `year`, `sample_size` and `seed` are optional there:
///
/// ```rust
/// use emergency_call_data::processing::FilterCriteria;
///
/// let criteria = FilterCriteria::from_json(
///     r#"{"categories":["EMS","Fire"],"date_range":{"start":"2016-01-01","end":"2016-12-31"}}"#,
/// )
/// .unwrap();
/// assert_eq!(criteria.sample_size, 1000);
/// assert_eq!(criteria.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Allowed categories. Empty means nothing matches.
    pub categories: BTreeSet<String>,
    pub date_range: DateRange,
    #[serde(default)]
    pub year: Option<i32>,
    /// Upper bound on rows handed to the scatter plot.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    /// Sampling seed; `None` samples non-deterministically.
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,
}

pub const DEFAULT_SAMPLE_SIZE: usize = 1_000;
pub const DEFAULT_SEED: u64 = 42;

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

fn default_seed() -> Option<u64> {
    Some(DEFAULT_SEED)
}

impl FilterCriteria {
    pub fn new<I, S>(categories: I, date_range: DateRange) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            date_range,
            year: None,
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: Some(DEFAULT_SEED),
        }
    }

    /// Everything in `table` selected: all categories over the full date span.
    ///
    /// Returns `None` for a table without any timestamps.
    pub fn all(table: &DataSet) -> Option<Self> {
        let (start, end) = summary::date_bounds(table)?;
        Some(Self::new(summary::categories(table), DateRange::new(start, end)))
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Whether a record with this category and timestamp passes every predicate.
    pub fn matches(&self, category: &str, timestamp: NaiveDateTime) -> bool {
        let date = timestamp.date();
        self.categories.contains(category)
            && self.date_range.contains(date)
            && self.year.is_none_or(|y| date.year() == y)
    }

    pub fn from_json(json: &str) -> Result<Self, CriteriaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CriteriaError> {
        Ok(serde_json::to_string(self)?)
    }
}
