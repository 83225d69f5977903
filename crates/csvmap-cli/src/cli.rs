//! CLI argument definitions for csv-mapper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use csvmap_model::CsvEncoding;
use csvmap_persistence::DEFAULT_STORE_FILE;

#[derive(Parser)]
#[command(
    name = "csv-mapper",
    version,
    about = "CSV column mapper - Convert CSV files through saved column mappings",
    long_about = "Convert CSV files by mapping source columns onto target columns.\n\n\
                  Each mapping runs its source value through an ordered list of text\n\
                  converters (split, replace, prefix, padding, date format, ...).\n\
                  Mappings are kept in named profiles."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Profile store file.
    #[arg(
        long = "store",
        value_name = "PATH",
        default_value = DEFAULT_STORE_FILE,
        global = true
    )]
    pub store: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a CSV file with a profile's mappings.
    Convert(ConvertArgs),

    /// Manage saved profiles.
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// List converter kinds and their settings.
    Converters,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// CSV file to convert.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Profile document path, or the id or name of a stored profile.
    #[arg(long = "profile", short = 'p', value_name = "FILE|NAME")]
    pub profile: String,

    /// Write the converted rows to this file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Input encoding (utf-8 or sjis). Detected when neither this nor the profile sets it.
    #[arg(long = "encoding", value_name = "ENCODING", value_parser = parse_encoding)]
    pub encoding: Option<CsvEncoding>,

    /// Keep only rows whose value in this column matches --filter-pattern.
    #[arg(long = "filter-column", value_name = "ID", requires = "filter_pattern")]
    pub filter_column: Option<String>,

    /// Regular expression for the data filter.
    #[arg(long = "filter-pattern", value_name = "REGEX", requires = "filter_column")]
    pub filter_pattern: Option<String>,

    /// Match the filter against converted values instead of source values.
    #[arg(long = "filter-target", requires = "filter_column")]
    pub filter_target: bool,

    /// Write the output without a UTF-8 byte order mark.
    #[arg(long = "no-bom")]
    pub no_bom: bool,

    /// Seed for random prefixes, for reproducible output.
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Print the first N converted rows (default 10 when no --output is given).
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,

    /// Report every converter that fell back to a default value.
    #[arg(long = "diagnostics")]
    pub diagnostics: bool,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// List stored profiles.
    List,

    /// Show a profile's columns and mappings.
    Show {
        /// Profile id or name.
        #[arg(value_name = "PROFILE")]
        profile: String,
    },

    /// Write a profile to a document file.
    Export {
        /// Profile id or name.
        #[arg(value_name = "PROFILE")]
        profile: String,

        /// Destination file (default: <NAME>.json).
        #[arg(long = "output", short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Add a profile from a document file.
    Import {
        /// Profile document to import.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Replace stored profiles with the same name.
        #[arg(long = "overwrite")]
        overwrite: bool,
    },

    /// Delete a stored profile.
    Delete {
        /// Profile id or name.
        #[arg(value_name = "PROFILE")]
        profile: String,
    },

    /// Rename a stored profile.
    Rename {
        /// Profile id or name.
        #[arg(value_name = "PROFILE")]
        profile: String,

        /// New name.
        #[arg(value_name = "NAME")]
        name: String,
    },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_encoding(value: &str) -> Result<CsvEncoding, String> {
    value
        .parse::<CsvEncoding>()
        .map_err(|error| error.to_string())
}
