//! Mapping rules.
//!
//! A [`Mapping`] routes zero or more source columns, joined by a separator,
//! through an ordered converter pipeline into one target column.
//!
//! Persisted documents may carry the older single-source shape
//! (`sourceColumnId: "..."`). Reading goes through [`MappingRecord`], which
//! accepts both shapes; the conversion into [`Mapping`] is the only place
//! the legacy field is looked at.

use serde::{Deserialize, Serialize};

use crate::converter::ConverterConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MappingRecord")]
pub struct Mapping {
    pub id: String,
    /// Source column ids, in merge order. May be empty.
    pub source_column_ids: Vec<String>,
    pub target_column_id: String,
    /// Pipeline steps in execution order. Never empty.
    pub converters: Vec<ConverterConfig>,
    /// Joins resolved source values when more than one id is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

impl Mapping {
    /// A single-step `direct` mapping with no sources.
    pub fn new(id: impl Into<String>, target_column_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_column_ids: Vec::new(),
            target_column_id: target_column_id.into(),
            converters: vec![ConverterConfig::Direct],
            separator: None,
        }
    }

    pub fn with_source(mut self, source_column_id: impl Into<String>) -> Self {
        self.source_column_ids.push(source_column_id.into());
        self
    }

    pub fn with_sources<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_column_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the pipeline. An empty list falls back to a single `direct` step.
    pub fn with_converters(mut self, converters: Vec<ConverterConfig>) -> Self {
        self.converters = non_empty_pipeline(converters);
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or("")
    }

    pub fn is_multi_source(&self) -> bool {
        self.source_column_ids.len() > 1
    }

    pub fn references_source(&self, column_id: &str) -> bool {
        self.source_column_ids.iter().any(|id| id == column_id)
    }
}

/// Persisted mapping shape, accepting both the list and the legacy single-id form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MappingRecord {
    pub id: String,
    pub source_column_id: Option<String>,
    pub source_column_ids: Option<Vec<String>>,
    pub target_column_id: String,
    pub converters: Option<Vec<ConverterConfig>>,
    pub separator: Option<String>,
}

impl From<MappingRecord> for Mapping {
    fn from(record: MappingRecord) -> Self {
        Self {
            id: record.id,
            source_column_ids: normalize_source_ids(
                record.source_column_id,
                record.source_column_ids,
            ),
            target_column_id: record.target_column_id,
            converters: non_empty_pipeline(record.converters.unwrap_or_default()),
            separator: record.separator,
        }
    }
}

/// Resolve the canonical source id list from the two persisted fields.
///
/// A non-empty list wins; otherwise a non-empty legacy id becomes a
/// one-element list; otherwise the mapping has no sources.
pub fn normalize_source_ids(single: Option<String>, list: Option<Vec<String>>) -> Vec<String> {
    match (single, list) {
        (_, Some(ids)) if !ids.is_empty() => ids,
        (Some(id), _) if !id.is_empty() => vec![id],
        _ => Vec::new(),
    }
}

fn non_empty_pipeline(converters: Vec<ConverterConfig>) -> Vec<ConverterConfig> {
    if converters.is_empty() {
        vec![ConverterConfig::Direct]
    } else {
        converters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_wins_over_legacy_id() {
        let ids = normalize_source_ids(Some("old".into()), Some(vec!["a".into(), "b".into()]));
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn empty_list_falls_back_to_legacy_id() {
        let ids = normalize_source_ids(Some("old".into()), Some(Vec::new()));
        assert_eq!(ids, vec!["old"]);
    }

    #[test]
    fn empty_legacy_id_means_no_sources() {
        assert!(normalize_source_ids(Some(String::new()), None).is_empty());
        assert!(normalize_source_ids(None, None).is_empty());
    }

    #[test]
    fn empty_pipeline_defaults_to_direct() {
        let mapping = Mapping::new("m1", "t1").with_converters(Vec::new());
        assert_eq!(mapping.converters, vec![ConverterConfig::Direct]);
    }
}
