use csvmap_model::SplitOptions;

use crate::error::{ConvertError, Result};

/// Split on a literal delimiter and pick one part.
///
/// A negative index counts from the end; an index past either end is an
/// [`ConvertError::IndexOutOfRange`].
pub fn try_split(value: &str, options: &SplitOptions) -> Result<String> {
    let parts: Vec<&str> = value.split(options.delimiter()).collect();
    let index = options.index();
    let position = if index < 0 {
        parts.len() as i64 + index
    } else {
        index
    };
    usize::try_from(position)
        .ok()
        .and_then(|position| parts.get(position))
        .map(|part| (*part).to_string())
        .ok_or(ConvertError::IndexOutOfRange {
            index,
            parts: parts.len(),
        })
}

pub fn split(value: &str, options: &SplitOptions) -> String {
    try_split(value, options).unwrap_or_else(|error| error.fallback(value))
}
