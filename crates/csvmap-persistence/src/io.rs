//! JSON file reading and atomic writing.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use csvmap_model::ProfileDocument;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PersistenceError, Result};

/// Keys a profile document must carry, even if their lists are empty.
const REQUIRED_DOCUMENT_KEYS: [&str; 4] = ["name", "sourceColumns", "targetColumns", "mappings"];

/// Read a profile document and check that it is complete.
pub fn read_profile_document(path: &Path) -> Result<ProfileDocument> {
    let value: Value = read_json(path)?;
    let Some(object) = value.as_object() else {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "expected a JSON object".to_string(),
        });
    };
    if let Some(missing) = REQUIRED_DOCUMENT_KEYS
        .iter()
        .find(|key| object.get(**key).is_none_or(Value::is_null))
    {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: format!("missing field '{missing}'"),
        });
    }

    let document: ProfileDocument =
        serde_json::from_value(value).map_err(|source| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source,
        })?;
    document.validate()?;
    tracing::info!("Read profile '{}' from {}", document.name, path.display());
    Ok(document)
}

/// Write a profile document as pretty-printed JSON.
pub fn write_profile_document(path: &Path, document: &ProfileDocument) -> Result<()> {
    document.validate()?;
    write_json_atomic(path, document)?;
    tracing::info!("Wrote profile '{}' to {}", document.name, path.display());
    Ok(())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Deserialization {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize to a temp file beside `path`, then rename it into place.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(value)
        .map_err(|source| PersistenceError::Serialization { source })?;
    bytes.push(b'\n');

    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })
}
