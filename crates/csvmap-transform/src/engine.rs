//! Row transformation.
//!
//! [`Transformer`] applies a mapping list to a batch of rows. Every output
//! row starts with each declared target column set to the empty string;
//! mappings then run in list order and later ones overwrite earlier ones.

use std::collections::HashSet;

use csvmap_model::{Column, Mapping, Row, cell_value};
use tracing::{info, warn};

use crate::context::{Diagnostic, DiagnosticLevel, RowRef, RunContext, TransformOptions};
use crate::pipeline::run_pipeline;

/// Result of a transformation run.
#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    /// Output rows, one per input row, keyed by target column id.
    pub rows: Vec<Row>,

    /// Per-mapping statistics for mappings that ran.
    pub mapping_stats: Vec<MappingStats>,

    /// Ids of mappings whose target column is not declared.
    pub skipped_mappings: Vec<String>,

    /// Diagnostic messages (if diagnostics enabled).
    pub diagnostics: Vec<Diagnostic>,
}

impl TransformResult {
    pub fn rows_processed(&self) -> usize {
        self.rows.len()
    }

    /// Total converter degradations across all mappings and rows.
    pub fn degraded_count(&self) -> usize {
        self.mapping_stats
            .iter()
            .map(|stats| stats.degraded_count)
            .sum()
    }

    /// Count warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count()
    }
}

/// Statistics for one mapping over a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingStats {
    pub mapping_id: String,
    pub target_column_id: String,
    /// Converter steps that fell back instead of converting.
    pub degraded_count: usize,
}

impl MappingStats {
    fn new(mapping: &Mapping) -> Self {
        Self {
            mapping_id: mapping.id.clone(),
            target_column_id: mapping.target_column_id.clone(),
            degraded_count: 0,
        }
    }
}

/// A configured transformation, borrowed read-only for the run.
#[derive(Debug, Clone)]
pub struct Transformer<'a> {
    source_columns: &'a [Column],
    target_columns: &'a [Column],
    mappings: &'a [Mapping],
    options: TransformOptions,
}

impl<'a> Transformer<'a> {
    pub fn new(
        source_columns: &'a [Column],
        target_columns: &'a [Column],
        mappings: &'a [Mapping],
    ) -> Self {
        Self {
            source_columns,
            target_columns,
            mappings,
            options: TransformOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Transform a batch of rows with a fresh [`RunContext`].
    pub fn run(&self, rows: &[Row]) -> TransformResult {
        let mut context = RunContext::from_options(&self.options);
        self.run_with_context(rows, &mut context)
    }

    /// Transform a batch of rows with caller-supplied run state.
    ///
    /// The context is reset with [`RunContext::begin_run`] first, so random
    /// prefixes are never shared between runs.
    pub fn run_with_context(&self, rows: &[Row], context: &mut RunContext) -> TransformResult {
        context.begin_run();
        let declared_sources: HashSet<&str> = self
            .source_columns
            .iter()
            .map(|column| column.id.as_str())
            .collect();
        let declared_targets: HashSet<&str> = self
            .target_columns
            .iter()
            .map(|column| column.id.as_str())
            .collect();

        let mut active = Vec::with_capacity(self.mappings.len());
        let mut skipped_mappings = Vec::new();
        for mapping in self.mappings {
            if declared_targets.contains(mapping.target_column_id.as_str()) {
                active.push(mapping);
            } else {
                warn!(
                    mapping_id = %mapping.id,
                    target_column_id = %mapping.target_column_id,
                    "mapping targets an undeclared column, skipping"
                );
                context.record(
                    Diagnostic::warning(format!(
                        "target column '{}' is not declared",
                        mapping.target_column_id
                    ))
                    .with_mapping(&mapping.id),
                );
                skipped_mappings.push(mapping.id.clone());
            }
        }

        let mut mapping_stats: Vec<MappingStats> =
            active.iter().map(|mapping| MappingStats::new(mapping)).collect();
        let mut output_rows = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let mut output: Row = self
                .target_columns
                .iter()
                .map(|column| (column.id.clone(), String::new()))
                .collect();

            for (mapping, stats) in active.iter().zip(mapping_stats.iter_mut()) {
                let start = starting_value(mapping, row, &output, &declared_sources);
                let outcome = run_pipeline(&start, mapping, context, Some(RowRef::new(index, row)));
                stats.degraded_count += outcome.degraded;
                output.insert(mapping.target_column_id.clone(), outcome.value);
            }
            output_rows.push(output);
        }

        let result = TransformResult {
            rows: output_rows,
            mapping_stats,
            skipped_mappings,
            diagnostics: context.take_diagnostics(),
        };
        info!(
            rows = result.rows_processed(),
            mappings = active.len(),
            skipped = result.skipped_mappings.len(),
            degraded = result.degraded_count(),
            "transformation complete"
        );
        result
    }
}

/// Resolve a mapping's input for one row.
///
/// Source ids that are undeclared or absent from the row contribute an
/// empty slot. A mapping without sources starts from the value already
/// written to its target in this row.
fn starting_value(
    mapping: &Mapping,
    row: &Row,
    output: &Row,
    declared_sources: &HashSet<&str>,
) -> String {
    if mapping.source_column_ids.is_empty() {
        return cell_value(output, &mapping.target_column_id).to_string();
    }
    mapping
        .source_column_ids
        .iter()
        .map(|id| {
            if declared_sources.contains(id.as_str()) {
                cell_value(row, id)
            } else {
                ""
            }
        })
        .collect::<Vec<&str>>()
        .join(mapping.separator())
}

/// Transform rows with default options.
pub fn transform(
    rows: &[Row],
    mappings: &[Mapping],
    source_columns: &[Column],
    target_columns: &[Column],
) -> Vec<Row> {
    Transformer::new(source_columns, target_columns, mappings)
        .run(rows)
        .rows
}
