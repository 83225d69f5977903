//! Per-run converter state and diagnostics.
//!
//! A [`RunContext`] is created for every transformation run and dropped at
//! the end of it. It owns everything a converter needs beyond its value and
//! configuration: the random number generator and the per-row random prefix
//! cache, the clock reading used for date prefixes, compiled date templates
//! and regexes, and the optional diagnostic channel.

use std::collections::HashMap;

use chrono::{Local, NaiveDateTime};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

use csvmap_model::Row;

use crate::converters::date_format::DateTemplate;
use crate::error::{ConvertError, Result};

/// Options for a transformation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Record every converter degradation.
    pub collect_diagnostics: bool,
    /// Seed for random prefixes. Unseeded runs draw from OS entropy.
    pub seed: Option<u64>,
    /// Fixed clock reading for date prefixes. Unset runs read the local clock once.
    pub now: Option<NaiveDateTime>,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagnostics(mut self) -> Self {
        self.collect_diagnostics = true;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }
}

/// The input row a converter is running against.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    /// Zero-based position of the row in the batch.
    pub index: usize,
    /// The full input row, keyed by source column id.
    pub values: &'a Row,
}

impl<'a> RowRef<'a> {
    pub fn new(index: usize, values: &'a Row) -> Self {
        Self { index, values }
    }
}

/// Mutable state shared by every converter in one run.
#[derive(Debug)]
pub struct RunContext {
    rng: StdRng,
    now: NaiveDateTime,
    random_prefixes: HashMap<(usize, usize), String>,
    templates: HashMap<String, Result<DateTemplate>>,
    patterns: HashMap<String, Result<Regex>>,
    diagnostics: Option<Vec<Diagnostic>>,
}

impl RunContext {
    /// A context with an entropy-seeded generator and the current local time.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            now: Local::now().naive_local(),
            random_prefixes: HashMap::new(),
            templates: HashMap::new(),
            patterns: HashMap::new(),
            diagnostics: None,
        }
    }

    pub fn from_options(options: &TransformOptions) -> Self {
        let mut context = Self::new();
        if let Some(seed) = options.seed {
            context = context.with_seed(seed);
        }
        if let Some(now) = options.now {
            context = context.with_clock(now);
        }
        if options.collect_diagnostics {
            context = context.with_diagnostics();
        }
        context
    }

    /// Enable the diagnostic channel.
    pub fn with_diagnostics(mut self) -> Self {
        self.diagnostics = Some(Vec::new());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// Clock reading for this run.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Reset per-run state before a new batch.
    ///
    /// Clears the random prefix cache and any pending diagnostics. The
    /// generator, clock and compiled caches carry over.
    pub fn begin_run(&mut self) {
        self.random_prefixes.clear();
        if let Some(diagnostics) = self.diagnostics.as_mut() {
            diagnostics.clear();
        }
    }

    /// Random alphanumeric text of `length` characters.
    ///
    /// With a row index the value is generated once per run for that row and
    /// then reused. The cache is keyed by row index and length, so two
    /// random prefix steps of different lengths in the same row draw
    /// independent values while steps of equal length share one. Without a
    /// row index every call draws a fresh value.
    pub fn random_prefix(&mut self, row: Option<usize>, length: usize) -> String {
        let Some(index) = row else {
            return self.random_text(length);
        };
        if let Some(cached) = self.random_prefixes.get(&(index, length)) {
            return cached.clone();
        }
        let text = self.random_text(length);
        self.random_prefixes.insert((index, length), text.clone());
        text
    }

    fn random_text(&mut self, length: usize) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }

    /// Compiled date template, compiled on first use in this run.
    pub fn date_template(&mut self, source: &str) -> Result<&DateTemplate> {
        self.templates
            .entry(source.to_string())
            .or_insert_with(|| DateTemplate::compile(source))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Compiled regex, compiled on first use in this run.
    pub fn pattern(&mut self, source: &str) -> Result<&Regex> {
        self.patterns
            .entry(source.to_string())
            .or_insert_with(|| {
                Regex::new(source).map_err(|error| ConvertError::InvalidPattern {
                    pattern: source.to_string(),
                    message: error.to_string(),
                })
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn collects_diagnostics(&self) -> bool {
        self.diagnostics.is_some()
    }

    /// Record a diagnostic if the channel is enabled.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        if let Some(diagnostics) = self.diagnostics.as_mut() {
            diagnostics.push(diagnostic);
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_deref().unwrap_or_default()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.as_mut().map(std::mem::take).unwrap_or_default()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A record of something a run did not do as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub level: DiagnosticLevel,

    /// Message text.
    pub message: String,

    /// Mapping the diagnostic belongs to.
    pub mapping_id: Option<String>,

    /// Row index (if applicable).
    pub row: Option<usize>,

    /// Position of the converter in the mapping's pipeline.
    pub converter_index: Option<usize>,

    /// Why the converter degraded, when one did.
    pub reason: Option<ConvertError>,
}

impl Diagnostic {
    /// A converter degradation.
    pub fn degraded(reason: ConvertError) -> Self {
        Self {
            level: reason.level(),
            message: reason.to_string(),
            mapping_id: None,
            row: None,
            converter_index: None,
            reason: Some(reason),
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message: message.into(),
            mapping_id: None,
            row: None,
            converter_index: None,
            reason: None,
        }
    }

    pub fn with_mapping(mut self, mapping_id: impl Into<String>) -> Self {
        self.mapping_id = Some(mapping_id.into());
        self
    }

    /// Add row context.
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_converter(mut self, index: usize) -> Self {
        self.converter_index = Some(index);
        self
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Expected degradation, such as a value that is not a date.
    Info,
    /// Configuration that cannot take effect.
    Warning,
}

impl DiagnosticLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_prefix_is_stable_per_row() {
        let mut context = RunContext::new().with_seed(7);
        let first = context.random_prefix(Some(0), 8);
        assert_eq!(first.chars().count(), 8);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(context.random_prefix(Some(0), 8), first);
        assert_ne!(context.random_prefix(Some(1), 8), first);
    }

    #[test]
    fn begin_run_forgets_cached_prefixes() {
        let mut context = RunContext::new().with_seed(7).with_diagnostics();
        let first = context.random_prefix(Some(0), 8);
        context.record(Diagnostic::warning("stale"));

        context.begin_run();
        assert!(context.diagnostics().is_empty());
        assert_ne!(context.random_prefix(Some(0), 8), first);
    }

    #[test]
    fn seeded_contexts_agree() {
        let mut left = RunContext::new().with_seed(42);
        let mut right = RunContext::new().with_seed(42);
        assert_eq!(left.random_prefix(Some(3), 12), right.random_prefix(Some(3), 12));
    }

    #[test]
    fn diagnostics_are_dropped_unless_enabled() {
        let mut silent = RunContext::new();
        silent.record(Diagnostic::warning("ignored"));
        assert!(silent.diagnostics().is_empty());

        let mut collecting = RunContext::new().with_diagnostics();
        collecting.record(Diagnostic::warning("kept").with_row(2));
        assert_eq!(collecting.diagnostics().len(), 1);
        assert_eq!(collecting.take_diagnostics()[0].row, Some(2));
        assert!(collecting.diagnostics().is_empty());
    }

    #[test]
    fn invalid_pattern_is_cached_as_error() {
        let mut context = RunContext::new();
        assert!(context.pattern("(unclosed").is_err());
        assert!(context.pattern("(unclosed").is_err());
        assert!(context.pattern(r"C\d{8}").is_ok());
    }
}
