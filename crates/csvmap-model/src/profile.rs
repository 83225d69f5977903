//! Profiles: named, persisted snapshots of a mapping configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::encoding::CsvEncoding;
use crate::error::{ModelError, Result};
use crate::filter::DataFilter;
use crate::mapping::Mapping;

/// A saved mapping configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub source_columns: Vec<Column>,
    pub target_columns: Vec<Column>,
    pub mappings: Vec<Mapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<CsvEncoding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_filter: Option<DataFilter>,
    /// Separator offered for new multi-source mappings, keyed by target column id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub separator_defaults: BTreeMap<String, String>,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub updated_at: i64,
}

impl Profile {
    /// The portable export form, without id or timestamps.
    pub fn to_document(&self) -> ProfileDocument {
        ProfileDocument {
            name: self.name.clone(),
            source_columns: self.source_columns.clone(),
            target_columns: self.target_columns.clone(),
            mappings: self.mappings.clone(),
            encoding: self.encoding,
            data_filter: self.data_filter.clone(),
            separator_defaults: self.separator_defaults.clone(),
        }
    }
}

/// Exported profile file contents.
///
/// Every field is optional on read so that [`ProfileDocument::validate`] can
/// report which required part is missing instead of a generic parse error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source_columns: Vec<Column>,
    #[serde(default)]
    pub target_columns: Vec<Column>,
    #[serde(default)]
    pub mappings: Vec<Mapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<CsvEncoding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_filter: Option<DataFilter>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub separator_defaults: BTreeMap<String, String>,
}

impl ProfileDocument {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::InvalidProfile {
                reason: "profile name is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Materialize a stored profile under a fresh id.
    pub fn into_profile(self, id: impl Into<String>, now_millis: i64) -> Profile {
        Profile {
            id: id.into(),
            name: self.name,
            source_columns: self.source_columns,
            target_columns: self.target_columns,
            mappings: self.mappings,
            encoding: self.encoding,
            data_filter: self.data_filter,
            separator_defaults: self.separator_defaults,
            created_at: now_millis,
            updated_at: now_millis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let document = ProfileDocument {
            name: "   ".to_string(),
            ..ProfileDocument::default()
        };
        assert!(matches!(
            document.validate(),
            Err(ModelError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn untargeted_mapping_is_accepted() {
        let document = ProfileDocument {
            name: "Draft".to_string(),
            mappings: vec![Mapping::new("mapping_1", "")],
            ..ProfileDocument::default()
        };
        assert!(document.validate().is_ok());
    }

    #[test]
    fn into_profile_stamps_id_and_times() {
        let document = ProfileDocument {
            name: "Customers".to_string(),
            ..ProfileDocument::default()
        };
        let profile = document.into_profile("profile_1", 1_700_000_000_000);
        assert_eq!(profile.id, "profile_1");
        assert_eq!(profile.created_at, profile.updated_at);
        assert_eq!(profile.to_document().name, "Customers");
    }
}
