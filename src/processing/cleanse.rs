//! Two-phase timestamp coercion: parse (may yield null), then cleanse (drops nulls).

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::calls::{LAT, LNG, TIMESTAMP};
use crate::types::{DataSet, DataType, Value};

/// Formats tried by default when parsing `timeStamp`, in order.
///
/// `%.f` also matches a missing fractional part. Date-only formats resolve to midnight.
pub const DEFAULT_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d",
    "%m/%d/%Y",
];

/// Parse one raw timestamp, trying `formats` in order and then RFC 3339.
///
/// RFC 3339 values carrying an offset are converted to UTC. Returns `None` when nothing
/// matches.
pub fn parse_timestamp<S: AsRef<str>>(raw: &str, formats: &[S]) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in formats {
        let fmt = fmt.as_ref();
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Convert the `timeStamp` column to [`DataType::DateTime`].
///
/// Unparsable or missing values become [`Value::Null`]; nothing fails. Values that are
/// already date-times pass through. Tables without a `timeStamp` column are returned as-is.
pub fn parse_timestamps<S: AsRef<str>>(dataset: &DataSet, formats: &[S]) -> DataSet {
    dataset.map_column(TIMESTAMP, DataType::DateTime, |value| match value {
        Value::DateTime(dt) => Value::DateTime(*dt),
        Value::Utf8(raw) => parse_timestamp(raw, formats)
            .map(Value::DateTime)
            .unwrap_or(Value::Null),
        _ => Value::Null,
    })
}

/// Keep only rows with a date-time `timeStamp` and numeric `lat` and `lng`.
///
/// Dropped rows are not reported; compare row counts if needed. A table lacking any of the
/// three columns cleanses to zero rows.
pub fn cleanse(dataset: &DataSet) -> DataSet {
    let idxs = (
        dataset.schema.index_of(TIMESTAMP),
        dataset.schema.index_of(LAT),
        dataset.schema.index_of(LNG),
    );
    let (Some(ts), Some(lat), Some(lng)) = idxs else {
        return dataset.filter_rows(|_| false);
    };

    dataset.filter_rows(|row| {
        matches!(row.get(ts), Some(Value::DateTime(_)))
            && row.get(lat).and_then(Value::as_f64).is_some()
            && row.get(lng).and_then(Value::as_f64).is_some()
    })
}
