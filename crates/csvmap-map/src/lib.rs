//! Mapping session for csv-mapper.
//!
//! Holds the editable configuration and loaded source rows, and runs the
//! transformation engine over them.

#![deny(unsafe_code)]

pub mod error;
pub mod session;

pub use error::{Result, SessionError};
pub use session::{MappingSession, MappingUpdate, Preview};
