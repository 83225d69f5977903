use csvmap_model::{ConditionalOptions, Row, cell_value};

use crate::context::RunContext;
use crate::error::{ConvertError, Result};

/// Choose between configured values by testing another column of the row.
///
/// The pattern is searched for anywhere in the tested value. A missing row
/// or column tests against the empty string.
pub fn try_conditional(
    value: &str,
    options: &ConditionalOptions,
    context: &mut RunContext,
    row: Option<&Row>,
) -> Result<String> {
    let column_id = options
        .column_id()
        .ok_or(ConvertError::IncompleteCondition {
            field: "conditionColumnId",
        })?;
    let pattern = options
        .pattern()
        .ok_or(ConvertError::IncompleteCondition {
            field: "conditionPattern",
        })?;
    let then_value = options.value().ok_or(ConvertError::IncompleteCondition {
        field: "conditionValue",
    })?;

    let tested = row.map_or("", |row| cell_value(row, column_id));
    if context.pattern(pattern)?.is_match(tested) {
        Ok(then_value.to_string())
    } else {
        Ok(options.else_value().unwrap_or(value).to_string())
    }
}

pub fn conditional(
    value: &str,
    options: &ConditionalOptions,
    context: &mut RunContext,
    row: Option<&Row>,
) -> String {
    try_conditional(value, options, context, row).unwrap_or_else(|error| error.fallback(value))
}
