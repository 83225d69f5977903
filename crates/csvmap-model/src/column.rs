//! Column definitions.

use serde::{Deserialize, Serialize};

/// Id prefix for columns derived from imported headers.
pub const SOURCE_ID_PREFIX: &str = "source_";

/// Id prefix for user-authored target columns.
pub const TARGET_ID_PREFIX: &str = "target_";

/// A source or target column.
///
/// The id is stable and unique within its collection; the name is only
/// used for display and export headers and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
}

impl Column {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Build a source column from an imported header.
    ///
    /// The id is derived from the header text, so re-importing a file with the
    /// same headers yields the same ids and existing mappings keep resolving.
    pub fn source(header: impl Into<String>) -> Self {
        let name = header.into();
        Self {
            id: format!("{SOURCE_ID_PREFIX}{name}"),
            name,
        }
    }
}

/// Look up a column by id.
pub fn find_column<'a>(columns: &'a [Column], id: &str) -> Option<&'a Column> {
    columns.iter().find(|column| column.id == id)
}
