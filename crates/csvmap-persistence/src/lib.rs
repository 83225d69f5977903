//! Persistent storage for csv-mapper profiles.
//!
//! Profiles are kept in a single JSON store file together with the id of the
//! profile that is currently loaded. Individual profiles can be exported to
//! and imported from standalone profile documents.
//!
//! # Architecture
//!
//! - `store.rs` - [`ProfileStore`]: list, save, load, rename, delete, import
//! - `io.rs` - JSON file reads and atomic writes, profile document files
//! - `error.rs` - Error types with user-friendly messages

#![deny(unsafe_code)]

mod error;
mod io;
mod store;

pub use error::{PersistenceError, Result};
pub use io::{read_profile_document, write_profile_document};
pub use store::{DEFAULT_STORE_FILE, ProfileStore, StoreData};
