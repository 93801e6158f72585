//! Aggregates consumed by presentation layers: widget bounds, histogram counts, map points,
//! and a per-column description table.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::calls::{CATEGORY, LAT, LNG, TIMESTAMP};
use crate::processing::{reduce, ReduceOp};
use crate::types::{DataSet, Value};

/// Monday-first week, the order histograms are drawn in.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Sorted distinct categories.
pub fn categories(table: &DataSet) -> Vec<String> {
    category_counts(table).into_keys().collect()
}

/// Number of calls per category.
pub fn category_counts(table: &DataSet) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    if let Some(values) = table.column(CATEGORY) {
        for category in values.filter_map(Value::as_str) {
            *counts.entry(category.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Earliest and latest call date, or `None` if the table has no timestamps.
pub fn date_bounds(table: &DataSet) -> Option<(NaiveDate, NaiveDate)> {
    let min = reduce(table, TIMESTAMP, ReduceOp::Min)?.as_datetime()?;
    let max = reduce(table, TIMESTAMP, ReduceOp::Max)?.as_datetime()?;
    Some((min.date(), max.date()))
}

/// Call volume per weekday, Monday first. Always seven entries.
pub fn day_of_week_counts(table: &DataSet) -> [(Weekday, usize); 7] {
    let mut counts = WEEKDAYS.map(|day| (day, 0usize));
    if let Some(values) = table.column(TIMESTAMP) {
        for ts in values.filter_map(Value::as_datetime) {
            counts[ts.weekday().num_days_from_monday() as usize].1 += 1;
        }
    }
    counts
}

/// `[lat, lng]` pairs for heatmap layers, skipping rows missing either coordinate.
pub fn heat_points(table: &DataSet) -> Vec<[f64; 2]> {
    let (Some(lat_idx), Some(lng_idx)) = (table.schema.index_of(LAT), table.schema.index_of(LNG))
    else {
        return Vec::new();
    };
    table
        .rows
        .iter()
        .filter_map(|row| {
            let lat = row.get(lat_idx)?.as_f64()?;
            let lng = row.get(lng_idx)?.as_f64()?;
            Some([lat, lng])
        })
        .collect()
}

/// Mean latitude and longitude, used to centre map views.
pub fn centroid(table: &DataSet) -> Option<(f64, f64)> {
    let lat = reduce(table, LAT, ReduceOp::Mean)?.as_f64()?;
    let lng = reduce(table, LNG, ReduceOp::Mean)?.as_f64()?;
    Some((lat, lng))
}

/// Descriptive statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Non-null values.
    pub count: usize,
    /// Distinct non-null values.
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first.
    pub top: Option<String>,
    /// Occurrences of `top`.
    pub freq: usize,
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Describe each named column that exists in `table`; unknown names are skipped.
pub fn describe(table: &DataSet, columns: &[&str]) -> Vec<ColumnSummary> {
    columns
        .iter()
        .filter_map(|&name| describe_column(table, name))
        .collect()
}

fn describe_column(table: &DataSet, name: &str) -> Option<ColumnSummary> {
    let values = table.column(name)?;

    // (first-seen position, occurrences) per rendered value
    let mut seen: HashMap<String, (usize, usize)> = HashMap::new();
    let mut count = 0;
    for value in values.filter(|v| !v.is_null()) {
        let key = value.to_string();
        let next_pos = seen.len();
        seen.entry(key).or_insert((next_pos, 0)).1 += 1;
        count += 1;
    }

    let top = seen
        .iter()
        .max_by(|(_, (pos_a, n_a)), (_, (pos_b, n_b))| n_a.cmp(n_b).then(pos_b.cmp(pos_a)))
        .map(|(key, (_, n))| (key.clone(), *n));

    let render = |v: Value| (!v.is_null()).then(|| v.to_string());
    Some(ColumnSummary {
        column: name.to_string(),
        count,
        unique: seen.len(),
        freq: top.as_ref().map_or(0, |(_, n)| *n),
        top: top.map(|(key, _)| key),
        min: reduce(table, name, ReduceOp::Min).and_then(render),
        max: reduce(table, name, ReduceOp::Max).and_then(render),
    })
}
