//! CLI library components for csv-mapper.

#![deny(unsafe_code)]

pub mod logging;
pub mod pipeline;
