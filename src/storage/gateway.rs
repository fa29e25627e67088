//! The key-value persistence capability.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{TrackerError, TrackerResult};

/// Storage keys used by the tracker.
pub mod keys {
    /// The worker configuration document.
    pub const WORKER_CONFIG: &str = "worker_config";
    /// The open week; absent while none is open.
    pub const CURRENT_WEEK: &str = "current_week";
    /// The list of closed weeks.
    pub const WEEK_HISTORY: &str = "week_history";
    /// The selected theme.
    pub const THEME_MODE: &str = "theme_mode";
    /// The notifications flag.
    pub const NOTIFICATIONS_ENABLED: &str = "notifications_enabled";

    /// Every key the tracker writes.
    pub const ALL: [&str; 5] = [
        WORKER_CONFIG,
        CURRENT_WEEK,
        WEEK_HISTORY,
        THEME_MODE,
        NOTIFICATIONS_ENABLED,
    ];
}

/// Durable string storage addressed by key.
///
/// Implementations hold serialized JSON documents; they do not interpret the
/// values they store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> TrackerResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> TrackerResult<()>;

    /// Removes `key`; removing an absent key is not an error.
    async fn remove(&self, key: &str) -> TrackerResult<()>;
}

/// Reads and deserializes the JSON document under `key`.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> TrackerResult<Option<T>> {
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| TrackerError::persistence(key, e)),
        None => Ok(None),
    }
}

/// Like [`load_json`], but a read or parse failure is logged, pushed onto
/// `errors` and treated as an absent key.
pub async fn load_json_or_recover<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    errors: &mut Vec<TrackerError>,
) -> Option<T> {
    match load_json(store, key).await {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Ignoring unreadable document");
            errors.push(e);
            None
        }
    }
}

/// Serializes `value` as JSON and stores it under `key`.
pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> TrackerResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| TrackerError::persistence(key, e))?;
    store.set(key, raw).await
}
