//! Converter dispatch.
//!
//! The single place a [`ConverterConfig`] variant is routed to its
//! implementation. A new converter kind needs a config variant in
//! `csvmap-model` and an arm here.

use csvmap_model::ConverterConfig;

use crate::context::{RowRef, RunContext};
use crate::converters;
use crate::error::Result;

/// Run one converter, reporting why it degraded if it did.
pub fn try_apply_converter(
    value: &str,
    config: &ConverterConfig,
    context: &mut RunContext,
    row: Option<RowRef<'_>>,
) -> Result<String> {
    match config {
        ConverterConfig::Direct | ConverterConfig::Unknown => Ok(value.to_string()),
        ConverterConfig::Split(options) => converters::try_split(value, options),
        ConverterConfig::Replace(options) => Ok(converters::replace(value, options)),
        ConverterConfig::Prefix(options) => Ok(converters::prefix(
            value,
            options,
            context,
            row.map(|row| row.index),
        )),
        ConverterConfig::Suffix(options) => Ok(converters::suffix(value, options)),
        ConverterConfig::Trim(options) => Ok(converters::trim(value, options)),
        ConverterConfig::Case(options) => Ok(converters::case(value, options)),
        ConverterConfig::Substring(options) => Ok(converters::substring(value, options)),
        ConverterConfig::Padding(options) => Ok(converters::padding(value, options)),
        ConverterConfig::Conditional(options) => {
            converters::try_conditional(value, options, context, row.map(|row| row.values))
        }
        ConverterConfig::DateFormat(options) => {
            converters::try_date_format(value, options, context)
        }
    }
}

/// Run one converter. Never fails; a degraded step yields its fallback value.
pub fn apply_converter(
    value: &str,
    config: &ConverterConfig,
    context: &mut RunContext,
    row: Option<RowRef<'_>>,
) -> String {
    try_apply_converter(value, config, context, row).unwrap_or_else(|error| error.fallback(value))
}

/// Run one converter outside of any run, with a throwaway context and no row.
pub fn convert(value: &str, config: &ConverterConfig) -> String {
    apply_converter(value, config, &mut RunContext::new(), None)
}

#[cfg(test)]
mod tests {
    use csvmap_model::{CaseType, Row};

    use super::*;

    #[test]
    fn direct_and_unknown_are_identity() {
        assert_eq!(convert("  x ", &ConverterConfig::Direct), "  x ");
        assert_eq!(convert("  x ", &ConverterConfig::Unknown), "  x ");
    }

    #[test]
    fn routes_to_each_kind() {
        assert_eq!(convert("a-b", &ConverterConfig::split("-", 1)), "b");
        assert_eq!(convert("abc", &ConverterConfig::case(CaseType::Upper)), "ABC");
        assert_eq!(convert("7", &ConverterConfig::fixed_prefix("#")), "#7");
        assert_eq!(
            convert("2024/03/31", &ConverterConfig::date_format("YYYY/MM/DD", "YYYYMMDD", 0)),
            "20240331"
        );
    }

    #[test]
    fn conditional_sees_the_row() {
        let config = ConverterConfig::conditional("source_kind", "^B$", "business", None);
        let values = Row::from([("source_kind".to_string(), "B".to_string())]);
        let mut context = RunContext::new();
        let result = apply_converter("x", &config, &mut context, Some(RowRef::new(0, &values)));
        assert_eq!(result, "business");
        assert_eq!(convert("x", &config), "x");
    }
}
