//! Delimited-text reading of call records.

use std::io::Read;
use std::path::Path;

use crate::calls;
use crate::error::{LoadError, LoadResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Read every record of a call table into a [`DataSet`].
///
/// Rules:
///
/// - The reader must have a header row; all header columns are kept, in order.
/// - The required call columns (`lat`, `lng`, `title`, `timeStamp`) must all be present,
///   otherwise [`LoadError::Schema`] lists the missing ones.
/// - Cells are typed per [`calls::read_type`]. Coercion is best-effort: empty or
///   unparsable cells become [`Value::Null`] rather than failing the read.
/// - Short records are padded with nulls; extra trailing cells are ignored.
///
/// `source` only labels [`LoadError::Read`] failures.
pub fn read_calls_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    source: &Path,
) -> LoadResult<DataSet> {
    let headers = rdr
        .headers()
        .map_err(|e| LoadError::read(source, e))?
        .clone();

    let missing = calls::missing_required(headers.iter());
    if !missing.is_empty() {
        return Err(LoadError::Schema { missing });
    }

    let schema = Schema::new(
        headers
            .iter()
            .map(|name| Field::new(name, calls::read_type(name)))
            .collect(),
    );

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| LoadError::read(source, e))?;
        let row = schema
            .fields
            .iter()
            .enumerate()
            .map(|(idx, field)| coerce(&field.data_type, record.get(idx).unwrap_or("")))
            .collect();
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

/// Best-effort conversion of a raw cell.
///
/// Only an empty cell is missing text; whitespace-only text is kept as is. Numbers are
/// parsed from the trimmed cell, and blank or non-finite numbers count as missing.
pub(crate) fn coerce(data_type: &DataType, raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }

    let trimmed = raw.trim();
    match data_type {
        DataType::Utf8 => Value::Utf8(raw.to_owned()),
        DataType::Float64 => match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Value::Float64(v),
            _ => Value::Null,
        },
        // Integer columns written by float-typed tools come through as "1.0".
        DataType::Int64 => match trimmed.parse::<i64>() {
            Ok(v) => Value::Int64(v),
            Err(_) => match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() && v.fract() == 0.0 => Value::Int64(v as i64),
                _ => Value::Null,
            },
        },
        DataType::DateTime => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::coerce;
    use crate::types::{DataType, Value};

    #[test]
    fn numeric_coercion_is_best_effort() {
        assert_eq!(coerce(&DataType::Float64, " 40.29 "), Value::Float64(40.29));
        assert_eq!(coerce(&DataType::Float64, "n/a"), Value::Null);
        assert_eq!(coerce(&DataType::Float64, "NaN"), Value::Null);
        assert_eq!(coerce(&DataType::Float64, ""), Value::Null);
    }

    #[test]
    fn integer_coercion_accepts_integral_floats() {
        assert_eq!(coerce(&DataType::Int64, "1"), Value::Int64(1));
        assert_eq!(coerce(&DataType::Int64, "1.0"), Value::Int64(1));
        assert_eq!(coerce(&DataType::Int64, "1.5"), Value::Null);
    }

    #[test]
    fn text_keeps_source_whitespace() {
        assert_eq!(
            coerce(&DataType::Utf8, "EMS: FALL "),
            Value::Utf8("EMS: FALL ".to_string())
        );
        assert_eq!(coerce(&DataType::Utf8, "   "), Value::Utf8("   ".to_string()));
        assert_eq!(coerce(&DataType::Utf8, ""), Value::Null);
        assert_eq!(coerce(&DataType::Float64, "   "), Value::Null);
        assert_eq!(coerce(&DataType::Int64, "   "), Value::Null);
    }
}
