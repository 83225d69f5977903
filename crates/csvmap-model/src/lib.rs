//! Data model for csv-mapper.
//!
//! This crate defines the shapes shared by every other crate in the workspace:
//!
//! - **column**: source and target column definitions
//! - **converter**: the converter configuration sum type, one variant per kind
//! - **mapping**: source-to-target mapping rules, including legacy shape normalization
//! - **row**: flat string rows keyed by column id
//! - **profile**: persisted snapshots of a mapping configuration
//! - **filter**: preview data filter settings
//! - **encoding**: character encodings accepted for tabular import

#![deny(unsafe_code)]

pub mod column;
pub mod converter;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod mapping;
pub mod profile;
pub mod row;

pub use column::{Column, SOURCE_ID_PREFIX, TARGET_ID_PREFIX, find_column};
pub use converter::{
    CaseOptions, CaseType, ConditionalOptions, ConverterConfig, ConverterKind, DateFormatOptions,
    PadType, PaddingOptions, PrefixOptions, PrefixType, ReplaceOptions, SplitOptions,
    SubstringOptions, SuffixOptions, TrimOptions, TrimType,
};
pub use encoding::CsvEncoding;
pub use error::{ModelError, Result};
pub use filter::{DataFilter, FilterSide};
pub use mapping::{Mapping, MappingRecord, normalize_source_ids};
pub use profile::{Profile, ProfileDocument};
pub use row::{Row, cell_value};
