//! Converter pipeline and row transformation engine.
//!
//! This crate turns mapped source rows into target rows:
//!
//! - **converters**: one module per converter kind, including the date-format
//!   micro-parser and the row-conditional converter
//! - **dispatch**: routes a converter configuration to its implementation
//! - **pipeline**: runs a mapping's converters in order
//! - **engine**: resolves sources per row and writes target columns
//! - **context**: per-run state (random prefix cache, clock, compiled
//!   templates and patterns) and diagnostics
//! - **filter**: preview and export row filtering

#![deny(unsafe_code)]

pub mod context;
pub mod converters;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod filter;
pub mod pipeline;

pub use context::{Diagnostic, DiagnosticLevel, RowRef, RunContext, TransformOptions};
pub use dispatch::{apply_converter, convert, try_apply_converter};
pub use engine::{MappingStats, TransformResult, Transformer, transform};
pub use error::ConvertError;
pub use filter::{FilteredRows, apply_data_filter, matching_indices};
pub use pipeline::{PipelineOutcome, run_pipeline};
