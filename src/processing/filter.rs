//! Row filtering for [`crate::types::DataSet`].

use crate::calls::{CATEGORY, TIMESTAMP};
use crate::types::{DataSet, Value};

use super::criteria::FilterCriteria;

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Rows whose category and timestamp satisfy `criteria`, in source order.
///
/// An empty category set, or a table lacking `Category` or `timeStamp`, yields an empty
/// table with the same schema. The input is never modified.
pub fn filter_calls(table: &DataSet, criteria: &FilterCriteria) -> DataSet {
    let (Some(cat_idx), Some(ts_idx)) =
        (table.schema.index_of(CATEGORY), table.schema.index_of(TIMESTAMP))
    else {
        return table.filter_rows(|_| false);
    };
    if criteria.categories.is_empty() {
        return table.filter_rows(|_| false);
    }

    let out = table.filter_rows(|row| match (row.get(cat_idx), row.get(ts_idx)) {
        (Some(Value::Utf8(category)), Some(Value::DateTime(ts))) => criteria.matches(category, *ts),
        _ => false,
    });
    if out.is_empty() {
        tracing::debug!(rows_in = table.row_count(), "no calls match the selected filters");
    }
    out
}
