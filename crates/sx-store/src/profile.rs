use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs};

use sx_core::{KvStore, StorageError};

use crate::error::{Result, StoreError};
use crate::store::Store;

pub const DEFAULT_PROFILE: &str = "default";

const DATA_DIR_NAME: &str = ".space-express";

fn home_dir() -> Option<PathBuf> {
    pick_home(env::var_os("HOME"), env::var_os("USERPROFILE"))
}

/// First non-empty of `HOME`, then `USERPROFILE`.
fn pick_home(home: Option<OsString>, userprofile: Option<OsString>) -> Option<PathBuf> {
    home.filter(|v| !v.is_empty())
        .or_else(|| userprofile.filter(|v| !v.is_empty()))
        .map(PathBuf::from)
}

/// Resolve the base directory for save data.
///
/// Priority: explicit override > `$HOME/.space-express` > `%USERPROFILE%/.space-express`.
/// `None` means the environment has nowhere durable to write.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = override_dir
        && !dir.as_os_str().is_empty()
    {
        return Some(dir.to_path_buf());
    }
    home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Sanitize a profile name for use as a filename.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn resolve_profile_id(profile_name: Option<&str>) -> String {
    profile_name
        .map(|name| sanitize_name(name.trim()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}

/// A named save slot.
///
/// Layout:
/// ```text
/// ~/.space-express/
/// └── profiles/
///     ├── default.db
///     └── <profile>.db
/// ```
pub struct ProfileStore {
    store: Store,
    profile_id: String,
}

impl ProfileStore {
    /// Open the profile's database under `base_dir`, creating directories as needed.
    pub fn open(profile_name: Option<&str>, base_dir: &Path) -> Result<Self> {
        let profiles_dir = base_dir.join("profiles");
        fs::create_dir_all(&profiles_dir).map_err(|e| {
            StoreError::InvalidData(format!("failed to create {}: {e}", profiles_dir.display()))
        })?;

        let profile_id = resolve_profile_id(profile_name);
        let store = Store::open(&profiles_dir.join(format!("{profile_id}.db")))?;

        Ok(Self { store, profile_id })
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl KvStore for ProfileStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        self.store.get(key)
    }

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        self.store.set(key, value)
    }
}
