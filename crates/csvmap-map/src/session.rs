//! Mapping session state.
//!
//! A [`MappingSession`] owns the editable configuration (source columns,
//! target columns, mappings) together with the currently loaded source
//! rows. Every edit goes through a method here so cascades stay consistent:
//! removing a target column removes the mappings that write to it, and a
//! mapping's pipeline never becomes empty.

use std::collections::{BTreeMap, HashSet};

use csvmap_model::{
    Column, ConverterConfig, CsvEncoding, DataFilter, Mapping, Profile, ProfileDocument, Row,
    TARGET_ID_PREFIX,
};
use csvmap_transform::{
    FilteredRows, TransformOptions, TransformResult, Transformer, apply_data_filter,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, SessionError};

const MAPPING_ID_PREFIX: &str = "mapping_";

/// Partial update of a mapping. Unset fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingUpdate {
    pub source_column_ids: Option<Vec<String>>,
    pub target_column_id: Option<String>,
    pub converters: Option<Vec<ConverterConfig>>,
    /// `Some(None)` clears the separator.
    pub separator: Option<Option<String>>,
}

impl MappingUpdate {
    pub fn sources<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_column_ids: Some(ids.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn target(id: impl Into<String>) -> Self {
        Self {
            target_column_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn separator(separator: impl Into<String>) -> Self {
        Self {
            separator: Some(Some(separator.into())),
            ..Self::default()
        }
    }
}

/// Transformed rows prepared for display, after the data filter.
#[derive(Debug, Clone, Default)]
pub struct Preview {
    pub source: Vec<Row>,
    pub transformed: Vec<Row>,
    /// Row count before filtering.
    pub total_rows: usize,
    pub result: TransformResult,
}

impl Preview {
    pub fn is_filtered(&self) -> bool {
        self.source.len() != self.total_rows
    }
}

/// Editable mapping configuration plus loaded source data.
#[derive(Debug, Clone, Default)]
pub struct MappingSession {
    source_columns: Vec<Column>,
    target_columns: Vec<Column>,
    mappings: Vec<Mapping>,
    source_data: Vec<Row>,
    encoding: Option<CsvEncoding>,
    data_filter: DataFilter,
    separator_defaults: BTreeMap<String, String>,
}

impl MappingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session holding a profile's configuration, with no data loaded.
    pub fn from_profile(profile: &Profile) -> Self {
        let mut session = Self::new();
        session.apply_profile(profile);
        session
    }

    // === Accessors ===

    pub fn source_columns(&self) -> &[Column] {
        &self.source_columns
    }

    pub fn target_columns(&self) -> &[Column] {
        &self.target_columns
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn mapping(&self, id: &str) -> Option<&Mapping> {
        self.mappings.iter().find(|mapping| mapping.id == id)
    }

    pub fn source_data(&self) -> &[Row] {
        &self.source_data
    }

    pub fn encoding(&self) -> Option<CsvEncoding> {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: Option<CsvEncoding>) {
        self.encoding = encoding;
    }

    pub fn data_filter(&self) -> &DataFilter {
        &self.data_filter
    }

    pub fn set_data_filter(&mut self, filter: DataFilter) {
        self.data_filter = filter;
    }

    pub fn separator_defaults(&self) -> &BTreeMap<String, String> {
        &self.separator_defaults
    }

    /// Remember the separator to use for new multi-source mappings into a target.
    pub fn set_separator_default(&mut self, target_column_id: &str, separator: impl Into<String>) {
        self.separator_defaults
            .insert(target_column_id.to_string(), separator.into());
    }

    // === Source columns and data ===

    /// Replace the source columns. Mappings keep their ids; undeclared ones resolve to empty.
    pub fn set_source_columns(&mut self, columns: Vec<Column>) {
        debug!(columns = columns.len(), "source columns replaced");
        self.source_columns = columns;
    }

    /// Replace the loaded rows.
    pub fn set_source_data(&mut self, rows: Vec<Row>) {
        debug!(rows = rows.len(), "source data replaced");
        self.source_data = rows;
    }

    // === Target columns ===

    /// Append a target column under a fresh id and return the id.
    pub fn add_target_column(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyColumnName);
        }
        let id = format!("{TARGET_ID_PREFIX}{}", Uuid::new_v4().simple());
        self.target_columns.push(Column::new(id.clone(), name));
        Ok(id)
    }

    pub fn rename_target_column(&mut self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyColumnName);
        }
        let column = self
            .target_columns
            .iter_mut()
            .find(|column| column.id == id)
            .ok_or_else(|| SessionError::TargetColumnNotFound(id.to_string()))?;
        column.name = name.to_string();
        Ok(())
    }

    /// Remove a target column and every mapping that writes to it.
    ///
    /// Returns the number of mappings removed.
    pub fn remove_target_column(&mut self, id: &str) -> Result<usize> {
        let position = self
            .target_columns
            .iter()
            .position(|column| column.id == id)
            .ok_or_else(|| SessionError::TargetColumnNotFound(id.to_string()))?;
        self.target_columns.remove(position);

        let before = self.mappings.len();
        self.mappings.retain(|mapping| mapping.target_column_id != id);
        self.separator_defaults.remove(id);
        let removed = before - self.mappings.len();
        debug!(target_column_id = id, removed_mappings = removed, "target column removed");
        Ok(removed)
    }

    pub fn reorder_target_columns(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.target_columns, from, to)
    }

    // === Mappings ===

    /// Append a mapping from the first source column to the first target column
    /// with a single `direct` step, and return its id.
    pub fn add_mapping(&mut self) -> String {
        let id = new_mapping_id();
        let mut mapping = Mapping::new(
            id.clone(),
            self.target_columns
                .first()
                .map(|column| column.id.clone())
                .unwrap_or_default(),
        );
        if let Some(source) = self.source_columns.first() {
            mapping = mapping.with_source(source.id.clone());
        }
        self.mappings.push(mapping);
        id
    }

    /// Append a fully specified mapping. An empty id is replaced with a fresh one.
    pub fn push_mapping(&mut self, mut mapping: Mapping) -> String {
        if mapping.id.is_empty() {
            mapping.id = new_mapping_id();
        }
        let id = mapping.id.clone();
        self.mappings.push(mapping);
        id
    }

    /// Apply a partial update. A mapping that ends up with several sources and
    /// no separator takes its target's separator default, if one is set.
    pub fn update_mapping(&mut self, id: &str, update: MappingUpdate) -> Result<()> {
        let Self {
            mappings,
            separator_defaults,
            ..
        } = self;
        let mapping = mappings
            .iter_mut()
            .find(|mapping| mapping.id == id)
            .ok_or_else(|| SessionError::MappingNotFound(id.to_string()))?;
        if let Some(ids) = update.source_column_ids {
            mapping.source_column_ids = ids;
        }
        if let Some(target) = update.target_column_id {
            mapping.target_column_id = target;
        }
        if let Some(converters) = update.converters {
            mapping.converters = if converters.is_empty() {
                vec![ConverterConfig::Direct]
            } else {
                converters
            };
        }
        if let Some(separator) = update.separator {
            mapping.separator = separator;
        }

        if mapping.is_multi_source()
            && mapping.separator.is_none()
            && let Some(default) = separator_defaults.get(&mapping.target_column_id)
        {
            mapping.separator = Some(default.clone());
        }
        Ok(())
    }

    pub fn remove_mapping(&mut self, id: &str) -> Result<()> {
        let position = self.mapping_position(id)?;
        self.mappings.remove(position);
        Ok(())
    }

    pub fn reorder_mappings(&mut self, from: usize, to: usize) -> Result<()> {
        move_item(&mut self.mappings, from, to)
    }

    /// Map each target column that has no mapping yet from the first source
    /// column with exactly the same name. Returns the number of mappings added.
    pub fn auto_map_matching_columns(&mut self) -> usize {
        let mapped: HashSet<&str> = self
            .mappings
            .iter()
            .map(|mapping| mapping.target_column_id.as_str())
            .collect();

        let new_mappings: Vec<Mapping> = self
            .target_columns
            .iter()
            .filter(|target| !mapped.contains(target.id.as_str()))
            .filter_map(|target| {
                self.source_columns
                    .iter()
                    .find(|source| source.name == target.name)
                    .map(|source| {
                        Mapping::new(new_mapping_id(), target.id.clone()).with_source(source.id.clone())
                    })
            })
            .collect();

        let added = new_mappings.len();
        self.mappings.extend(new_mappings);
        info!(added, "auto-mapped columns with matching names");
        added
    }

    // === Converters ===

    /// Append a `direct` step to a mapping's pipeline and return its position.
    pub fn add_converter(&mut self, mapping_id: &str) -> Result<usize> {
        let mapping = self.mapping_mut(mapping_id)?;
        mapping.converters.push(ConverterConfig::Direct);
        Ok(mapping.converters.len() - 1)
    }

    pub fn update_converter(
        &mut self,
        mapping_id: &str,
        index: usize,
        config: ConverterConfig,
    ) -> Result<()> {
        let mapping = self.mapping_mut(mapping_id)?;
        let len = mapping.converters.len();
        let slot = mapping
            .converters
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange { index, len })?;
        *slot = config;
        Ok(())
    }

    /// Remove a pipeline step. The last remaining step is kept; returns
    /// whether a step was removed.
    pub fn remove_converter(&mut self, mapping_id: &str, index: usize) -> Result<bool> {
        let mapping = self.mapping_mut(mapping_id)?;
        let len = mapping.converters.len();
        if index >= len {
            return Err(SessionError::IndexOutOfRange { index, len });
        }
        if len <= 1 {
            return Ok(false);
        }
        mapping.converters.remove(index);
        Ok(true)
    }

    pub fn reorder_converters(&mut self, mapping_id: &str, from: usize, to: usize) -> Result<()> {
        let mapping = self.mapping_mut(mapping_id)?;
        move_item(&mut mapping.converters, from, to)
    }

    // === Whole-session operations ===

    /// Clear configuration and data.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load a profile's configuration. Loaded rows are cleared.
    pub fn apply_profile(&mut self, profile: &Profile) {
        self.source_columns = profile.source_columns.clone();
        self.target_columns = profile.target_columns.clone();
        self.mappings = profile.mappings.clone();
        self.encoding = profile.encoding;
        self.data_filter = profile.data_filter.clone().unwrap_or_default();
        self.separator_defaults = profile.separator_defaults.clone();
        self.source_data.clear();
    }

    /// Export the configuration as a profile document under a name.
    pub fn to_document(&self, name: &str) -> ProfileDocument {
        ProfileDocument {
            name: name.to_string(),
            source_columns: self.source_columns.clone(),
            target_columns: self.target_columns.clone(),
            mappings: self.mappings.clone(),
            encoding: self.encoding,
            data_filter: (self.data_filter != DataFilter::default())
                .then(|| self.data_filter.clone()),
            separator_defaults: self.separator_defaults.clone(),
        }
    }

    /// Run the configured mappings over the loaded rows.
    pub fn transform(&self, options: TransformOptions) -> TransformResult {
        Transformer::new(&self.source_columns, &self.target_columns, &self.mappings)
            .with_options(options)
            .run(&self.source_data)
    }

    /// Transform the loaded rows and apply the session's data filter.
    pub fn preview(&self, options: TransformOptions) -> Preview {
        let result = self.transform(options);
        let FilteredRows {
            source,
            transformed,
        } = apply_data_filter(&self.source_data, &result.rows, &self.data_filter);
        Preview {
            source,
            transformed,
            total_rows: self.source_data.len(),
            result,
        }
    }

    fn mapping_position(&self, id: &str) -> Result<usize> {
        self.mappings
            .iter()
            .position(|mapping| mapping.id == id)
            .ok_or_else(|| SessionError::MappingNotFound(id.to_string()))
    }

    fn mapping_mut(&mut self, id: &str) -> Result<&mut Mapping> {
        self.mappings
            .iter_mut()
            .find(|mapping| mapping.id == id)
            .ok_or_else(|| SessionError::MappingNotFound(id.to_string()))
    }
}

fn new_mapping_id() -> String {
    format!("{MAPPING_ID_PREFIX}{}", Uuid::new_v4().simple())
}

/// Move the item at `from` so that it ends up at `to`.
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(SessionError::IndexOutOfRange { index, len });
        }
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}
