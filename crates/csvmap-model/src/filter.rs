//! Preview data filter settings.

use serde::{Deserialize, Serialize};

/// Which side of a transformation the filter inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterSide {
    /// The imported rows, before conversion.
    #[default]
    Source,
    /// The converted rows.
    Target,
}

/// Row filter applied to previews and exports.
///
/// Keeps row pairs whose `column_id` value on the chosen side matches `pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataFilter {
    pub enabled: bool,
    #[serde(rename = "columnType")]
    pub side: FilterSide,
    pub column_id: String,
    pub pattern: String,
}

impl DataFilter {
    pub fn new(side: FilterSide, column_id: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            enabled: true,
            side,
            column_id: column_id.into(),
            pattern: pattern.into(),
        }
    }

    /// Whether the filter is switched on and fully configured.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.column_id.is_empty() && !self.pattern.is_empty()
    }
}
