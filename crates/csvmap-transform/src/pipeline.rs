//! Converter pipelines.
//!
//! A mapping's converters run in array order, each receiving the previous
//! step's output. Degraded steps contribute their fallback value and the
//! pipeline continues.

use csvmap_model::Mapping;
use tracing::debug;

use crate::context::{Diagnostic, RowRef, RunContext};
use crate::dispatch::try_apply_converter;

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub value: String,
    /// Number of steps that fell back instead of converting.
    pub degraded: usize,
}

/// Run a mapping's converters over a starting value.
pub fn run_pipeline(
    value: &str,
    mapping: &Mapping,
    context: &mut RunContext,
    row: Option<RowRef<'_>>,
) -> PipelineOutcome {
    let mut current = value.to_string();
    let mut degraded = 0;

    for (position, config) in mapping.converters.iter().enumerate() {
        current = match try_apply_converter(&current, config, context, row) {
            Ok(next) => next,
            Err(error) => {
                degraded += 1;
                debug!(
                    mapping_id = %mapping.id,
                    row = row.map(|row| row.index),
                    converter = position,
                    kind = config.display_name(),
                    reason = %error,
                    "converter degraded"
                );
                let fallback = error.fallback(&current);
                if context.collects_diagnostics() {
                    let mut diagnostic = Diagnostic::degraded(error)
                        .with_mapping(&mapping.id)
                        .with_converter(position);
                    if let Some(row) = row {
                        diagnostic = diagnostic.with_row(row.index);
                    }
                    context.record(diagnostic);
                }
                fallback
            }
        };
    }

    PipelineOutcome {
        value: current,
        degraded,
    }
}
