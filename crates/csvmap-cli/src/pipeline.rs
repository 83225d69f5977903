//! Conversion pipeline behind `csv-mapper convert`.
//!
//! Resolve a profile, import the input file, run the profile's mappings and
//! apply the data filter. Writing the result is left to the caller so the
//! same [`Conversion`] can be previewed, exported, or both.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csvmap_ingest::{ExportOptions, read_csv_path, write_csv_path};
use csvmap_map::{MappingSession, Preview};
use csvmap_model::{CsvEncoding, DataFilter, Profile, Row};
use csvmap_persistence::{ProfileStore, read_profile_document};
use csvmap_transform::TransformOptions;
use tracing::{Level, info, info_span, trace, warn};

use crate::logging::redact_value;

/// Id given to profiles read straight from a document file.
pub const FILE_PROFILE_ID: &str = "file";

/// Inputs of one conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertRequest {
    pub input: PathBuf,
    /// Overrides the profile's encoding. Detected from the bytes when neither is set.
    pub encoding: Option<CsvEncoding>,
    /// Overrides the profile's data filter.
    pub filter: Option<DataFilter>,
    pub options: TransformOptions,
}

impl ConvertRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: Option<CsvEncoding>) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Option<DataFilter>) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }
}

/// Outcome of a conversion run.
#[derive(Debug)]
pub struct Conversion {
    pub profile_name: String,
    pub session: MappingSession,
    pub preview: Preview,
    /// Encoding the input was decoded with.
    pub encoding: CsvEncoding,
    /// Source column ids used by mappings but absent from the input file.
    pub missing_sources: Vec<String>,
}

impl Conversion {
    /// Rows that pass the data filter.
    pub fn output_rows(&self) -> &[Row] {
        &self.preview.transformed
    }

    /// Write the filtered rows under the profile's target column headers.
    pub fn export(&self, path: &Path, options: ExportOptions) -> Result<()> {
        write_csv_path(
            path,
            self.output_rows(),
            self.session.target_columns(),
            options,
        )
        .with_context(|| format!("write {}", path.display()))
    }
}

/// Find a profile by document path, stored id, or stored name, in that order.
pub fn resolve_profile(reference: &str, store: &ProfileStore) -> Result<Profile> {
    let path = Path::new(reference);
    if path.is_file() {
        let document =
            read_profile_document(path).with_context(|| format!("read profile {reference}"))?;
        return Ok(document.into_profile(FILE_PROFILE_ID, 0));
    }
    store
        .resolve(reference)
        .cloned()
        .with_context(|| format!("profile store {}", store.path().display()))
}

/// Import the input file and run the profile's mappings over it.
pub fn run_conversion(profile: &Profile, request: ConvertRequest) -> Result<Conversion> {
    let span = info_span!("convert", profile = %profile.name, input = %request.input.display());
    let _guard = span.enter();

    let mut session = MappingSession::from_profile(profile);
    let encoding = request.encoding.or(profile.encoding);
    let table = read_csv_path(&request.input, encoding)
        .with_context(|| format!("import {}", request.input.display()))?;

    let missing_sources = missing_sources(&session, &table.columns);
    for id in &missing_sources {
        warn!(column = %id, "mapped source column is not in the input file");
    }

    session.set_source_columns(table.columns);
    session.set_source_data(table.rows);
    session.set_encoding(Some(table.encoding));
    if let Some(filter) = request.filter {
        session.set_data_filter(filter);
    }

    let preview = session.preview(request.options);
    if tracing::enabled!(Level::TRACE) {
        for (index, row) in preview.transformed.iter().enumerate() {
            let values: Vec<&str> = row.values().map(|value| redact_value(value)).collect();
            trace!(row = index, values = ?values, "output row");
        }
    }
    info!(
        rows = preview.total_rows,
        kept = preview.transformed.len(),
        degraded = preview.result.degraded_count(),
        "conversion finished"
    );

    Ok(Conversion {
        profile_name: profile.name.clone(),
        session,
        preview,
        encoding: table.encoding,
        missing_sources,
    })
}

fn missing_sources(session: &MappingSession, columns: &[csvmap_model::Column]) -> Vec<String> {
    let present: BTreeSet<&str> = columns.iter().map(|column| column.id.as_str()).collect();
    let referenced: BTreeSet<&str> = session
        .mappings()
        .iter()
        .flat_map(|mapping| mapping.source_column_ids.iter().map(String::as_str))
        .collect();
    referenced
        .difference(&present)
        .map(|id| (*id).to_string())
        .collect()
}
