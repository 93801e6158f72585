//! Emergency call record columns and the category derivation rule.

use crate::types::DataType;

pub const LAT: &str = "lat";
pub const LNG: &str = "lng";
pub const DESC: &str = "desc";
pub const ZIP: &str = "zip";
pub const TITLE: &str = "title";
pub const TIMESTAMP: &str = "timeStamp";
pub const TWP: &str = "twp";
pub const ADDR: &str = "addr";
pub const E: &str = "e";
pub const CATEGORY: &str = "Category";

/// Columns every source table must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [LAT, LNG, TITLE, TIMESTAMP];

/// Columns used when present but not required.
pub const OPTIONAL_COLUMNS: [&str; 6] = [DESC, ZIP, TWP, ADDR, E, CATEGORY];

/// Storage type for a source column at read time.
///
/// Coordinates are numeric and `e` is an integer flag; everything else, `timeStamp` included,
/// is kept as text until a later phase converts it.
pub fn read_type(column: &str) -> DataType {
    match column {
        LAT | LNG => DataType::Float64,
        E => DataType::Int64,
        _ => DataType::Utf8,
    }
}

/// Required columns absent from `headers`, in [`REQUIRED_COLUMNS`] order.
pub fn missing_required<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().collect();
    REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(col))
        .map(|col| col.to_string())
        .collect()
}

/// Category label of a call title: the text before the first `:`, or the whole title.
///
/// Whitespace is left exactly as it appears in the source.
pub fn derive_category(title: &str) -> &str {
    match title.split_once(':') {
        Some((category, _)) => category,
        None => title,
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_category, missing_required, read_type};
    use crate::types::DataType;

    #[test]
    fn category_is_text_before_first_colon() {
        assert_eq!(derive_category("EMS: BACK PAINS/INJURY"), "EMS");
        assert_eq!(derive_category("Fire: GAS-ODOR/LEAK"), "Fire");
        assert_eq!(derive_category("Traffic: VEHICLE ACCIDENT: PA TURNPIKE"), "Traffic");
    }

    #[test]
    fn category_without_colon_is_whole_title() {
        assert_eq!(derive_category("Traffic"), "Traffic");
        assert_eq!(derive_category(""), "");
    }

    #[test]
    fn category_keeps_source_whitespace() {
        assert_eq!(derive_category(" EMS : FALL"), " EMS ");
        assert_eq!(derive_category(":leading"), "");
    }

    #[test]
    fn missing_required_lists_every_absent_column() {
        let missing = missing_required(["title", "lat", "desc"]);
        assert_eq!(missing, vec!["lng".to_string(), "timeStamp".to_string()]);
        assert!(missing_required(["lat", "lng", "title", "timeStamp"]).is_empty());
    }

    #[test]
    fn read_types() {
        assert_eq!(read_type("lat"), DataType::Float64);
        assert_eq!(read_type("e"), DataType::Int64);
        assert_eq!(read_type("timeStamp"), DataType::Utf8);
        assert_eq!(read_type("zip"), DataType::Utf8);
    }
}
