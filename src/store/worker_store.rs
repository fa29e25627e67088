//! Persistent worker configuration store.

use std::sync::Arc;

use tracing::{info, warn};

use crate::clock::Clock;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{WorkerConfig, WorkerConfigPatch};
use crate::storage::{KeyValueStore, keys, load_json_or_recover, save_json};
use crate::validation::validate_worker_config;

/// Holds the worker configuration and writes it through to storage.
pub struct WorkerStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    config: Option<WorkerConfig>,
    load_errors: Vec<TrackerError>,
}

impl WorkerStore {
    /// Reads the configuration from storage.
    ///
    /// An unreadable document is logged and treated as missing, so setup
    /// can run again.
    pub async fn load(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> TrackerResult<Self> {
        let mut load_errors = Vec::new();
        let config =
            load_json_or_recover(storage.as_ref(), keys::WORKER_CONFIG, &mut load_errors).await;
        Ok(Self {
            storage,
            clock,
            config,
            load_errors,
        })
    }

    /// Returns the failures skipped while loading.
    pub fn load_errors(&self) -> &[TrackerError] {
        &self.load_errors
    }

    /// Returns the configuration, if setup has run.
    pub fn config(&self) -> Option<&WorkerConfig> {
        self.config.as_ref()
    }

    /// Returns the configuration or [`TrackerError::NotConfigured`].
    pub fn require(&self) -> TrackerResult<&WorkerConfig> {
        self.config.as_ref().ok_or(TrackerError::NotConfigured)
    }

    /// Returns `true` once setup has completed.
    pub fn is_configured(&self) -> bool {
        self.config.as_ref().is_some_and(|c| c.setup_completed)
    }

    /// Validates and stores a whole configuration.
    pub async fn save(&mut self, mut config: WorkerConfig) -> TrackerResult<()> {
        validate_worker_config(&config)?;
        config.setup_completed = true;
        info!(name = %config.name, hourly_rate = %config.hourly_rate, "Saved worker configuration");
        self.config = Some(config);
        self.persist().await
    }

    /// Merges `patch` into the stored configuration.
    ///
    /// The merged result is validated before anything changes.
    pub async fn update(&mut self, patch: WorkerConfigPatch) -> TrackerResult<()> {
        let current = self.config.as_ref().ok_or(TrackerError::NotConfigured)?;
        let mut updated = current.clone();
        updated.apply(patch, self.clock.now());
        validate_worker_config(&updated)?;
        info!(name = %updated.name, hourly_rate = %updated.hourly_rate, "Updated worker configuration");
        self.config = Some(updated);
        self.persist().await
    }

    /// Deletes the configuration.
    pub async fn reset(&mut self) -> TrackerResult<()> {
        self.config = None;
        info!("Reset worker configuration");
        self.persist().await
    }

    pub(crate) fn forget(&mut self) {
        self.config = None;
        self.load_errors.clear();
    }

    async fn persist(&self) -> TrackerResult<()> {
        let result = match &self.config {
            Some(config) => save_json(self.storage.as_ref(), keys::WORKER_CONFIG, config).await,
            None => self.storage.remove(keys::WORKER_CONFIG).await,
        };
        if let Err(e) = &result {
            warn!(error = %e, "Worker configuration kept in memory but not persisted");
        }
        result
    }
}

impl std::fmt::Debug for WorkerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
