//! Column reductions over [`crate::types::DataSet`].

use std::cmp::Ordering;

use crate::types::{DataSet, DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Count non-null values.
    CountNonNull,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Arithmetic mean of numeric values, ignoring nulls.
    Mean,
    /// Minimum value, ignoring nulls.
    Min,
    /// Maximum value, ignoring nulls.
    Max,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - `Sum` keeps the column's numeric type; `Mean` is always `Float64`.
/// - `Min`/`Max` work on numeric, date-time and text columns.
/// - Apart from the counts, returns `Some(Value::Null)` if there are no non-null values.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;
    let data_type = &dataset.schema.fields.get(idx)?.data_type;
    let values = dataset.rows.iter().filter_map(|row| row.get(idx)).filter(|v| !v.is_null());

    let out = match op {
        ReduceOp::Count => Value::Int64(dataset.row_count() as i64),
        ReduceOp::CountNonNull => Value::Int64(values.count() as i64),
        ReduceOp::Sum => match data_type {
            DataType::Int64 => {
                let mut acc: Option<i64> = None;
                for v in values {
                    if let Value::Int64(v) = v {
                        acc = Some(acc.map_or(*v, |a| a + v));
                    }
                }
                acc.map(Value::Int64).unwrap_or(Value::Null)
            }
            DataType::Float64 => {
                let mut acc: Option<f64> = None;
                for v in values.filter_map(Value::as_f64) {
                    acc = Some(acc.map_or(v, |a| a + v));
                }
                acc.map(Value::Float64).unwrap_or(Value::Null)
            }
            _ => Value::Null,
        },
        ReduceOp::Mean => {
            let (sum, n) = values
                .filter_map(Value::as_f64)
                .fold((0.0_f64, 0_usize), |(s, n), v| (s + v, n + 1));
            if n == 0 {
                Value::Null
            } else {
                Value::Float64(sum / n as f64)
            }
        }
        ReduceOp::Min => extreme(values, Ordering::Less),
        ReduceOp::Max => extreme(values, Ordering::Greater),
    };
    Some(out)
}

fn extreme<'a>(values: impl Iterator<Item = &'a Value>, keep: Ordering) -> Value {
    let mut best: Option<&Value> = None;
    for v in values {
        best = match best {
            Some(b) if v.partial_cmp_same_type(b) != Some(keep) => Some(b),
            _ => Some(v),
        };
    }
    best.cloned().unwrap_or(Value::Null)
}
