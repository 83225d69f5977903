//! Converter configuration.
//!
//! A converter is one step of a mapping pipeline. Its configuration is a sum
//! type tagged by `type`; each variant carries only the fields that kind
//! reads. Every field is optional in the persisted form, and the accessor
//! methods on the option structs apply the per-kind defaults, so a document
//! written with only `{"type": "split"}` still converts.
//!
//! Fields that belong to other kinds are ignored on read. An unrecognised
//! `type` tag deserializes to [`ConverterConfig::Unknown`], which converts as
//! the identity.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Configuration of a single pipeline step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConverterConfig {
    /// Copy the value unchanged.
    #[default]
    Direct,
    Split(SplitOptions),
    Replace(ReplaceOptions),
    Prefix(PrefixOptions),
    Suffix(SuffixOptions),
    Trim(TrimOptions),
    Case(CaseOptions),
    Substring(SubstringOptions),
    Padding(PaddingOptions),
    Conditional(ConditionalOptions),
    DateFormat(DateFormatOptions),
    /// A kind this build does not know about.
    #[serde(other)]
    Unknown,
}

impl ConverterConfig {
    /// The kind of this step, or `None` for an unrecognised tag.
    pub fn kind(&self) -> Option<ConverterKind> {
        Some(match self {
            Self::Direct => ConverterKind::Direct,
            Self::Split(_) => ConverterKind::Split,
            Self::Replace(_) => ConverterKind::Replace,
            Self::Prefix(_) => ConverterKind::Prefix,
            Self::Suffix(_) => ConverterKind::Suffix,
            Self::Trim(_) => ConverterKind::Trim,
            Self::Case(_) => ConverterKind::Case,
            Self::Substring(_) => ConverterKind::Substring,
            Self::Padding(_) => ConverterKind::Padding,
            Self::Conditional(_) => ConverterKind::Conditional,
            Self::DateFormat(_) => ConverterKind::DateFormat,
            Self::Unknown => return None,
        })
    }

    /// Human-readable label for this step.
    pub fn display_name(&self) -> &'static str {
        self.kind().map_or("Unknown", ConverterKind::display_name)
    }

    pub fn split(delimiter: impl Into<String>, index: i64) -> Self {
        Self::Split(SplitOptions {
            delimiter: Some(delimiter.into()),
            index: Some(index),
        })
    }

    pub fn replace(search: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::Replace(ReplaceOptions {
            search_value: Some(search.into()),
            replace_value: Some(replacement.into()),
        })
    }

    pub fn fixed_prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(PrefixOptions {
            prefix_type: Some(PrefixType::Fixed),
            fixed_prefix: Some(prefix.into()),
            ..PrefixOptions::default()
        })
    }

    pub fn random_prefix(length: usize) -> Self {
        Self::Prefix(PrefixOptions {
            prefix_type: Some(PrefixType::Random),
            random_length: Some(length),
            ..PrefixOptions::default()
        })
    }

    pub fn date_prefix(template: impl Into<String>) -> Self {
        Self::Prefix(PrefixOptions {
            prefix_type: Some(PrefixType::Date),
            date_format: Some(template.into()),
            ..PrefixOptions::default()
        })
    }

    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self::Suffix(SuffixOptions {
            suffix: Some(suffix.into()),
        })
    }

    pub fn trim(trim_type: TrimType) -> Self {
        Self::Trim(TrimOptions {
            trim_type: Some(trim_type),
        })
    }

    pub fn case(case_type: CaseType) -> Self {
        Self::Case(CaseOptions {
            case_type: Some(case_type),
        })
    }

    pub fn substring(start: i64, end: Option<i64>) -> Self {
        Self::Substring(SubstringOptions {
            substring_start: Some(start),
            substring_end: end,
        })
    }

    pub fn padding(pad_type: PadType, pad_char: impl Into<String>, pad_length: i64) -> Self {
        Self::Padding(PaddingOptions {
            pad_type: Some(pad_type),
            pad_char: Some(pad_char.into()),
            pad_length: Some(pad_length),
        })
    }

    pub fn conditional(
        column_id: impl Into<String>,
        pattern: impl Into<String>,
        value: impl Into<String>,
        else_value: Option<String>,
    ) -> Self {
        Self::Conditional(ConditionalOptions {
            condition_column_id: Some(column_id.into()),
            condition_pattern: Some(pattern.into()),
            condition_value: Some(value.into()),
            condition_else_value: else_value,
        })
    }

    pub fn date_format(
        input: impl Into<String>,
        output: impl Into<String>,
        offset_months: i32,
    ) -> Self {
        Self::DateFormat(DateFormatOptions {
            date_input_format: Some(input.into()),
            date_output_format: Some(output.into()),
            date_offset_months: (offset_months != 0).then_some(offset_months),
        })
    }
}

/// The set of converter kinds, used for listing and for switching a step's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterKind {
    Direct,
    Split,
    Replace,
    Prefix,
    Suffix,
    Trim,
    Case,
    Substring,
    Padding,
    Conditional,
    DateFormat,
}

impl ConverterKind {
    pub const ALL: [ConverterKind; 11] = [
        ConverterKind::Direct,
        ConverterKind::Split,
        ConverterKind::Replace,
        ConverterKind::Prefix,
        ConverterKind::Suffix,
        ConverterKind::Trim,
        ConverterKind::Case,
        ConverterKind::Substring,
        ConverterKind::Padding,
        ConverterKind::Conditional,
        ConverterKind::DateFormat,
    ];

    /// The `type` tag used in persisted documents.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Split => "split",
            Self::Replace => "replace",
            Self::Prefix => "prefix",
            Self::Suffix => "suffix",
            Self::Trim => "trim",
            Self::Case => "case",
            Self::Substring => "substring",
            Self::Padding => "padding",
            Self::Conditional => "conditional",
            Self::DateFormat => "dateFormat",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Split => "Split",
            Self::Replace => "Replace",
            Self::Prefix => "Prefix",
            Self::Suffix => "Suffix",
            Self::Trim => "Trim",
            Self::Case => "Case",
            Self::Substring => "Substring",
            Self::Padding => "Padding",
            Self::Conditional => "Conditional",
            Self::DateFormat => "Date format",
        }
    }

    /// Configuration fields read by this kind.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Direct => &[],
            Self::Split => &["delimiter", "index"],
            Self::Replace => &["searchValue", "replaceValue"],
            Self::Prefix => &["prefixType", "fixedPrefix", "randomLength", "dateFormat"],
            Self::Suffix => &["suffix"],
            Self::Trim => &["trimType"],
            Self::Case => &["caseType"],
            Self::Substring => &["substringStart", "substringEnd"],
            Self::Padding => &["padType", "padChar", "padLength"],
            Self::Conditional => &[
                "conditionColumnId",
                "conditionPattern",
                "conditionValue",
                "conditionElseValue",
            ],
            Self::DateFormat => &["dateInputFormat", "dateOutputFormat", "dateOffsetMonths"],
        }
    }

    /// A step of this kind with every field unset.
    pub fn default_config(self) -> ConverterConfig {
        match self {
            Self::Direct => ConverterConfig::Direct,
            Self::Split => ConverterConfig::Split(SplitOptions::default()),
            Self::Replace => ConverterConfig::Replace(ReplaceOptions::default()),
            Self::Prefix => ConverterConfig::Prefix(PrefixOptions::default()),
            Self::Suffix => ConverterConfig::Suffix(SuffixOptions::default()),
            Self::Trim => ConverterConfig::Trim(TrimOptions::default()),
            Self::Case => ConverterConfig::Case(CaseOptions::default()),
            Self::Substring => ConverterConfig::Substring(SubstringOptions::default()),
            Self::Padding => ConverterConfig::Padding(PaddingOptions::default()),
            Self::Conditional => ConverterConfig::Conditional(ConditionalOptions::default()),
            Self::DateFormat => ConverterConfig::DateFormat(DateFormatOptions::default()),
        }
    }
}

impl std::str::FromStr for ConverterKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::UnknownConverterKind(s.to_string()))
    }
}

impl std::fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SplitOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

impl SplitOptions {
    /// Literal delimiter; unset or empty means a single space.
    pub fn delimiter(&self) -> &str {
        match self.delimiter.as_deref() {
            Some(delimiter) if !delimiter.is_empty() => delimiter,
            _ => " ",
        }
    }

    pub fn index(&self) -> i64 {
        self.index.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplaceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_value: Option<String>,
}

impl ReplaceOptions {
    pub fn search_value(&self) -> &str {
        self.search_value.as_deref().unwrap_or("")
    }

    pub fn replace_value(&self) -> &str {
        self.replace_value.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixType {
    #[default]
    Fixed,
    Random,
    Date,
}

/// Default length of a generated random prefix.
pub const DEFAULT_RANDOM_LENGTH: usize = 8;

/// Default template for a date prefix.
pub const DEFAULT_PREFIX_DATE_FORMAT: &str = "YYYYMMDD";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrefixOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_type: Option<PrefixType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

impl PrefixOptions {
    pub fn prefix_type(&self) -> PrefixType {
        self.prefix_type.unwrap_or_default()
    }

    pub fn fixed_prefix(&self) -> &str {
        self.fixed_prefix.as_deref().unwrap_or("")
    }

    /// Random prefix length; unset or zero falls back to the default.
    pub fn random_length(&self) -> usize {
        match self.random_length {
            Some(length) if length > 0 => length,
            _ => DEFAULT_RANDOM_LENGTH,
        }
    }

    pub fn date_format(&self) -> &str {
        match self.date_format.as_deref() {
            Some(template) if !template.is_empty() => template,
            _ => DEFAULT_PREFIX_DATE_FORMAT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuffixOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl SuffixOptions {
    pub fn suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimType {
    #[default]
    Both,
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrimOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_type: Option<TrimType>,
}

impl TrimOptions {
    pub fn trim_type(&self) -> TrimType {
        self.trim_type.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseType {
    #[default]
    Upper,
    Lower,
    Capitalize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_type: Option<CaseType>,
}

impl CaseOptions {
    pub fn case_type(&self) -> CaseType {
        self.case_type.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubstringOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substring_start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substring_end: Option<i64>,
}

impl SubstringOptions {
    pub fn start(&self) -> i64 {
        self.substring_start.unwrap_or(0)
    }

    pub fn end(&self) -> Option<i64> {
        self.substring_end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadType {
    #[default]
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaddingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad_type: Option<PadType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad_char: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad_length: Option<i64>,
}

impl PaddingOptions {
    pub fn pad_type(&self) -> PadType {
        self.pad_type.unwrap_or_default()
    }

    /// Fill text, repeated as needed. `"0"` when unset or empty.
    pub fn pad_char(&self) -> &str {
        match self.pad_char.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => "0",
        }
    }

    /// Target length in characters; `None` means "keep the current length".
    pub fn pad_length(&self) -> Option<i64> {
        self.pad_length
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionalOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_column_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_else_value: Option<String>,
}

impl ConditionalOptions {
    /// Column id to test, if configured and non-empty.
    pub fn column_id(&self) -> Option<&str> {
        self.condition_column_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Regex source to test, if configured and non-empty.
    pub fn pattern(&self) -> Option<&str> {
        self.condition_pattern
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
    }

    pub fn value(&self) -> Option<&str> {
        self.condition_value.as_deref()
    }

    /// Else-branch value. An empty string counts as unset.
    pub fn else_value(&self) -> Option<&str> {
        self.condition_else_value
            .as_deref()
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateFormatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_input_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_offset_months: Option<i32>,
}

impl DateFormatOptions {
    pub fn input_format(&self) -> Option<&str> {
        self.date_input_format
            .as_deref()
            .filter(|template| !template.is_empty())
    }

    pub fn output_format(&self) -> Option<&str> {
        self.date_output_format
            .as_deref()
            .filter(|template| !template.is_empty())
    }

    pub fn offset_months(&self) -> i32 {
        self.date_offset_months.unwrap_or(0)
    }
}
