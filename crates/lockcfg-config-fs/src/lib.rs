// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `SettingsBackend` for lockcfg (uses platform config dir).

use directories::ProjectDirs;
use lockcfg_core::{SettingsBackend, StoreError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Store slots as JSON files under one directory.
#[derive(Debug, Clone)]
pub struct FsSettingsBackend {
    base: PathBuf,
}

impl FsSettingsBackend {
    /// Create a backend rooted at the user config directory
    /// (e.g., `~/.config/LockSettings`).
    pub fn new() -> Result<Self, StoreError> {
        let proj = ProjectDirs::from("com", "codingchallenge", "LockSettings")
            .ok_or_else(|| StoreError::Other("could not resolve config dir".into()))?;
        Self::at(proj.config_dir())
    }

    /// Create a backend rooted at `dir`, creating it if needed.
    pub fn at(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base = dir.as_ref().to_path_buf();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// Directory holding the slot files.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl SettingsBackend for FsSettingsBackend {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.base)?;
        // Same directory as the target so the rename cannot cross filesystems.
        let mut tmp = NamedTempFile::new_in(&self.base)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        debug!(path = %path.display(), bytes = data.len(), "slot written");
        Ok(())
    }
}
