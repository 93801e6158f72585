//! Derivation of the `Category` column.

use crate::calls::{derive_category, CATEGORY, TITLE};
use crate::types::{DataSet, DataType, Field, Value};

/// Append a `Category` column derived from `title`, unless one already exists.
///
/// Non-null cells of an existing `Category` column are kept verbatim; null cells are filled
/// from the row's title. A missing or null title yields an empty category, so the column
/// never holds nulls.
pub fn with_category(dataset: &DataSet) -> DataSet {
    let title_idx = dataset.schema.index_of(TITLE);
    let derived = |row: &[Value]| {
        let title = title_idx.and_then(|i| row.get(i)).and_then(Value::as_str);
        Value::Utf8(derive_category(title.unwrap_or_default()).to_string())
    };

    let Some(category_idx) = dataset.schema.index_of(CATEGORY) else {
        return dataset.with_column(Field::new(CATEGORY, DataType::Utf8), derived);
    };

    let mut out = dataset.clone();
    out.schema.fields[category_idx].data_type = DataType::Utf8;
    for row in &mut out.rows {
        if row.get(category_idx).is_none_or(Value::is_null) {
            let category = derived(row.as_slice());
            match row.get_mut(category_idx) {
                Some(cell) => *cell = category,
                None => {
                    row.resize(category_idx, Value::Null);
                    row.push(category);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::with_category;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn titles(values: Vec<Value>) -> DataSet {
        let schema = Schema::new(vec![Field::new("title", DataType::Utf8)]);
        DataSet::new(schema, values.into_iter().map(|v| vec![v]).collect())
    }

    #[test]
    fn derives_category_per_row() {
        let ds = titles(vec![
            Value::Utf8("EMS: FALL".to_string()),
            Value::Utf8("Traffic".to_string()),
            Value::Null,
        ]);
        let out = with_category(&ds);

        assert_eq!(out.schema.index_of("Category"), Some(1));
        let cats: Vec<&str> = out.column("Category").unwrap().filter_map(Value::as_str).collect();
        assert_eq!(cats, vec!["EMS", "Traffic", ""]);
    }

    #[test]
    fn existing_category_column_is_kept() {
        let schema = Schema::new(vec![
            Field::new("title", DataType::Utf8),
            Field::new("Category", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![vec![
                Value::Utf8("EMS: FALL".to_string()),
                Value::Utf8("Medical".to_string()),
            ]],
        );
        let out = with_category(&ds);
        assert_eq!(out, ds);
    }

    #[test]
    fn null_cells_of_existing_category_are_derived() {
        let schema = Schema::new(vec![
            Field::new("title", DataType::Utf8),
            Field::new("Category", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Utf8("EMS: FALL".to_string()), Value::Null],
                vec![Value::Utf8("Fire: ALARM".to_string()), Value::Utf8("Medical".to_string())],
                vec![Value::Null, Value::Null],
            ],
        );
        let out = with_category(&ds);

        let cats: Vec<Value> = out.column("Category").unwrap().cloned().collect();
        assert_eq!(
            cats,
            vec![
                Value::Utf8("EMS".to_string()),
                Value::Utf8("Medical".to_string()),
                Value::Utf8(String::new()),
            ]
        );
    }

    #[test]
    fn derivation_is_repeatable() {
        let ds = titles(vec![Value::Utf8("Fire: ALARM".to_string())]);
        assert_eq!(with_category(&ds), with_category(&ds));
    }
}
