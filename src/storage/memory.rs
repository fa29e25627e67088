//! In-memory storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{TrackerError, TrackerResult};

use super::gateway::KeyValueStore;

/// A [`KeyValueStore`] held in a `HashMap`.
///
/// Writes can be made to fail on demand with [`MemoryStore::set_fail_writes`]
/// or, for a single key, [`MemoryStore::set_failing_key`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
    failing_key: RwLock<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set` and `remove` fail while `fail` is `true`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes `set` and `remove` fail for `key` only, or for no key when `None`.
    pub async fn set_failing_key(&self, key: Option<&str>) {
        *self.failing_key.write().await = key.map(str::to_string);
    }

    /// Returns the number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn check_writable(&self, key: &str) -> TrackerResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TrackerError::persistence(key, "writes are disabled"));
        }
        if self.failing_key.read().await.as_deref() == Some(key) {
            return Err(TrackerError::persistence(key, "writes to this key are disabled"));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> TrackerResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> TrackerResult<()> {
        self.check_writable(key).await?;
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> TrackerResult<()> {
        self.check_writable(key).await?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}
