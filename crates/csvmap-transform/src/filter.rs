//! Row filtering for previews and exports.

use csvmap_model::{DataFilter, FilterSide, Row, cell_value};
use regex::Regex;
use tracing::debug;

/// Source and transformed rows that passed a filter, still paired by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredRows {
    pub source: Vec<Row>,
    pub transformed: Vec<Row>,
}

/// Positions of row pairs that pass the filter.
///
/// Returns `None` when the filter does not apply: it is disabled, missing a
/// column or pattern, or its pattern does not compile.
pub fn matching_indices(
    source: &[Row],
    transformed: &[Row],
    filter: &DataFilter,
) -> Option<Vec<usize>> {
    if !filter.is_active() {
        return None;
    }
    let regex = match Regex::new(&filter.pattern) {
        Ok(regex) => regex,
        Err(error) => {
            debug!(pattern = %filter.pattern, %error, "ignoring filter with invalid pattern");
            return None;
        }
    };
    let inspected = match filter.side {
        FilterSide::Source => source,
        FilterSide::Target => transformed,
    };
    Some(
        inspected
            .iter()
            .enumerate()
            .filter(|(_, row)| regex.is_match(cell_value(row, &filter.column_id)))
            .map(|(index, _)| index)
            .collect(),
    )
}

/// Keep the row pairs whose chosen side matches the filter pattern.
pub fn apply_data_filter(source: &[Row], transformed: &[Row], filter: &DataFilter) -> FilteredRows {
    match matching_indices(source, transformed, filter) {
        None => FilteredRows {
            source: source.to_vec(),
            transformed: transformed.to_vec(),
        },
        Some(indices) => FilteredRows {
            source: indices.iter().filter_map(|&i| source.get(i).cloned()).collect(),
            transformed: indices
                .iter()
                .filter_map(|&i| transformed.get(i).cloned())
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(column: &str, values: &[&str]) -> Vec<Row> {
        values
            .iter()
            .map(|value| Row::from([(column.to_string(), (*value).to_string())]))
            .collect()
    }

    #[test]
    fn filters_on_source_side() {
        let source = rows("source_code", &["A1", "B2", "A3"]);
        let transformed = rows("target_1", &["x", "y", "z"]);
        let filter = DataFilter::new(FilterSide::Source, "source_code", "^A");

        let filtered = apply_data_filter(&source, &transformed, &filter);
        assert_eq!(filtered.source, rows("source_code", &["A1", "A3"]));
        assert_eq!(filtered.transformed, rows("target_1", &["x", "z"]));
    }

    #[test]
    fn filters_on_target_side() {
        let source = rows("source_code", &["A1", "B2"]);
        let transformed = rows("target_1", &["keep", "drop"]);
        let filter = DataFilter::new(FilterSide::Target, "target_1", "keep");

        assert_eq!(matching_indices(&source, &transformed, &filter), Some(vec![0]));
    }

    #[test]
    fn inactive_or_invalid_filter_keeps_everything() {
        let source = rows("source_code", &["A1", "B2"]);
        let transformed = rows("target_1", &["x", "y"]);

        let mut disabled = DataFilter::new(FilterSide::Source, "source_code", "^A");
        disabled.enabled = false;
        assert_eq!(matching_indices(&source, &transformed, &disabled), None);

        let invalid = DataFilter::new(FilterSide::Source, "source_code", "[");
        let filtered = apply_data_filter(&source, &transformed, &invalid);
        assert_eq!(filtered.source.len(), 2);
    }
}
