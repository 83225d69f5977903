//! The profile store file.

use std::path::{Path, PathBuf};

use chrono::Utc;
use csvmap_map::MappingSession;
use csvmap_model::{ModelError, Profile, ProfileDocument};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{PersistenceError, Result};
use crate::io::{read_json, write_json_atomic};

/// File name used when no store path is given.
pub const DEFAULT_STORE_FILE: &str = "csv-mapper-profiles.json";

const PROFILE_ID_PREFIX: &str = "profile_";

/// On-disk contents of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreData {
    pub profiles: Vec<Profile>,
    pub current_profile_id: Option<String>,
}

/// Saved profiles plus the id of the one currently loaded.
///
/// Edits are made in memory; call [`ProfileStore::save`] to write them.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
    data: StoreData,
}

impl ProfileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            read_json(&path)?
        } else {
            debug!("No profile store at {}, starting empty", path.display());
            StoreData::default()
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.data.profiles
    }

    pub fn current_profile_id(&self) -> Option<&str> {
        self.data.current_profile_id.as_deref()
    }

    pub fn current_profile(&self) -> Option<&Profile> {
        self.current_profile_id().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.data.profiles.iter().find(|profile| profile.id == id)
    }

    /// First profile with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Profile> {
        self.data.profiles.iter().find(|profile| profile.name == name)
    }

    /// Look a profile up by id, falling back to name.
    pub fn resolve(&self, id_or_name: &str) -> Result<&Profile> {
        self.get(id_or_name)
            .or_else(|| self.find_by_name(id_or_name))
            .ok_or_else(|| PersistenceError::ProfileNotFound(id_or_name.to_string()))
    }

    /// Write the store to disk.
    pub fn save(&self) -> Result<()> {
        write_json_atomic(&self.path, &self.data)?;
        info!(
            "Saved {} profile(s) to {}",
            self.data.profiles.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Snapshot the session's configuration as a new profile and make it current.
    pub fn save_profile(&mut self, name: &str, session: &MappingSession) -> Result<String> {
        let document = session.to_document(name.trim());
        document.validate()?;
        let id = new_profile_id();
        self.data
            .profiles
            .push(document.into_profile(id.clone(), now_millis()));
        self.data.current_profile_id = Some(id.clone());
        debug!(profile = %id, "saved profile '{}'", name.trim());
        Ok(id)
    }

    /// Replace the session's configuration with a stored profile.
    pub fn load_profile(&mut self, id: &str, session: &mut MappingSession) -> Result<()> {
        let profile = self
            .get(id)
            .ok_or_else(|| PersistenceError::ProfileNotFound(id.to_string()))?;
        session.apply_profile(profile);
        self.data.current_profile_id = Some(id.to_string());
        debug!(profile = %id, "loaded profile");
        Ok(())
    }

    /// Remove a profile. Clears the current id if it pointed at it.
    pub fn delete_profile(&mut self, id: &str) -> Result<Profile> {
        let position = self.position(id)?;
        let removed = self.data.profiles.remove(position);
        if self.data.current_profile_id.as_deref() == Some(id) {
            self.data.current_profile_id = None;
        }
        Ok(removed)
    }

    pub fn rename_profile(&mut self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelError::InvalidProfile {
                reason: "profile name is empty".to_string(),
            }
            .into());
        }
        let position = self.position(id)?;
        let profile = &mut self.data.profiles[position];
        profile.name = name.to_string();
        profile.updated_at = now_millis();
        Ok(())
    }

    /// Overwrite the current profile's configuration with the session's.
    pub fn update_current_profile(&mut self, session: &MappingSession) -> Result<()> {
        let id = self
            .data
            .current_profile_id
            .clone()
            .ok_or(PersistenceError::NoCurrentProfile)?;
        let position = self.position(&id)?;
        let profile = &mut self.data.profiles[position];
        let document = session.to_document(&profile.name);
        profile.source_columns = document.source_columns;
        profile.target_columns = document.target_columns;
        profile.mappings = document.mappings;
        profile.encoding = document.encoding;
        profile.data_filter = document.data_filter;
        profile.separator_defaults = document.separator_defaults;
        profile.updated_at = now_millis();
        Ok(())
    }

    /// The portable form of a stored profile.
    pub fn export_profile(&self, id: &str) -> Result<ProfileDocument> {
        self.get(id)
            .map(Profile::to_document)
            .ok_or_else(|| PersistenceError::ProfileNotFound(id.to_string()))
    }

    /// Add a document as a new profile and make it current.
    ///
    /// With `overwrite`, profiles sharing the document's name are removed
    /// first. Without it, a same-name profile is kept alongside.
    pub fn import_profile(&mut self, document: ProfileDocument, overwrite: bool) -> Result<String> {
        document.validate()?;
        if overwrite {
            let before = self.data.profiles.len();
            self.data
                .profiles
                .retain(|profile| profile.name != document.name);
            let replaced = before - self.data.profiles.len();
            if replaced > 0 {
                info!("Replaced {replaced} profile(s) named '{}'", document.name);
            }
            let current_removed = self
                .current_profile_id()
                .is_some_and(|current| self.get(current).is_none());
            if current_removed {
                self.data.current_profile_id = None;
            }
        }
        let id = new_profile_id();
        self.data
            .profiles
            .push(document.into_profile(id.clone(), now_millis()));
        self.data.current_profile_id = Some(id.clone());
        Ok(id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.data
            .profiles
            .iter()
            .position(|profile| profile.id == id)
            .ok_or_else(|| PersistenceError::ProfileNotFound(id.to_string()))
    }
}

fn new_profile_id() -> String {
    format!("{PROFILE_ID_PREFIX}{}", Uuid::new_v4().simple())
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
