use std::collections::BTreeMap;

/// One record: column id to cell text. All cells are strings.
pub type Row = BTreeMap<String, String>;

/// Cell text for a column id, empty when the row has no such key.
pub fn cell_value<'a>(row: &'a Row, column_id: &str) -> &'a str {
    row.get(column_id).map_or("", String::as_str)
}
