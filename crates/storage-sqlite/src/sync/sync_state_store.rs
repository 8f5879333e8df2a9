use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use dhanrakshak_core::errors::Result;
use dhanrakshak_core::sync::SyncStateStoreTrait;

/// File name of the sync state, kept next to the database file.
pub const SYNC_STATE_FILE: &str = "sync_state.json";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SyncStateFile {
    last_sync_time: Option<i64>,
}

/// Persists the last sync time as a small JSON document.
pub struct FileSyncStateStore {
    path: PathBuf,
}

impl FileSyncStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store placed in the same directory as the database at `db_path`.
    pub fn beside_database(db_path: &str) -> Self {
        let dir = Path::new(db_path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::new(dir.join(SYNC_STATE_FILE))
    }

    fn read(&self) -> Result<SyncStateFile> {
        if !self.path.exists() {
            return Ok(SyncStateFile::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl SyncStateStoreTrait for FileSyncStateStore {
    fn load_last_sync_time(&self) -> Result<Option<i64>> {
        Ok(self.read()?.last_sync_time)
    }

    fn save_last_sync_time(&self, millis: i64) -> Result<()> {
        let mut state = self.read().unwrap_or_default();
        state.last_sync_time = Some(millis);
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&state)?)?;
        debug!("Saved last sync time {} to {}", millis, self.path.display());
        Ok(())
    }
}
