//! File-backed storage: one JSON file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};

use super::gateway::KeyValueStore;

/// A [`KeyValueStore`] that keeps each key in `{dir}/{key}.json`.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> TrackerResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TrackerError::persistence(key, e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> TrackerResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| TrackerError::persistence(key, e))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value.as_bytes())
            .await
            .map_err(|e| TrackerError::persistence(key, e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| TrackerError::persistence(key, e))?;

        debug!(key, path = %path.display(), bytes = value.len(), "Wrote key");
        Ok(())
    }

    async fn remove(&self, key: &str) -> TrackerResult<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TrackerError::persistence(key, e)),
        }
    }
}
