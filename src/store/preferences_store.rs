//! Persistent app preferences.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Preferences, ThemeMode};
use crate::storage::{KeyValueStore, keys, load_json_or_recover, save_json};

/// Holds the theme and notification preferences.
pub struct PreferencesStore {
    storage: Arc<dyn KeyValueStore>,
    preferences: Preferences,
    load_errors: Vec<TrackerError>,
}

impl PreferencesStore {
    /// Reads preferences from storage, defaulting missing or unreadable keys.
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> TrackerResult<Self> {
        let mut load_errors = Vec::new();
        let theme_mode = load_json_or_recover(storage.as_ref(), keys::THEME_MODE, &mut load_errors)
            .await
            .unwrap_or_default();
        let notifications_enabled =
            load_json_or_recover(storage.as_ref(), keys::NOTIFICATIONS_ENABLED, &mut load_errors)
                .await
                .unwrap_or_default();
        Ok(Self {
            storage,
            preferences: Preferences {
                theme_mode,
                notifications_enabled,
            },
            load_errors,
        })
    }

    /// Returns the failures skipped while loading.
    pub fn load_errors(&self) -> &[TrackerError] {
        &self.load_errors
    }

    /// Returns the current preferences.
    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// Sets the theme.
    pub async fn set_theme(&mut self, theme_mode: ThemeMode) -> TrackerResult<()> {
        self.preferences.theme_mode = theme_mode;
        debug!(%theme_mode, "Theme changed");
        self.persist(keys::THEME_MODE, &theme_mode).await
    }

    /// Switches between light and dark and returns the new theme.
    pub async fn toggle_theme(&mut self) -> TrackerResult<ThemeMode> {
        let theme_mode = self.preferences.theme_mode.toggled();
        self.set_theme(theme_mode).await?;
        Ok(theme_mode)
    }

    /// Enables or disables notifications.
    pub async fn set_notifications(&mut self, enabled: bool) -> TrackerResult<()> {
        self.preferences.notifications_enabled = enabled;
        debug!(enabled, "Notifications changed");
        self.persist(keys::NOTIFICATIONS_ENABLED, &enabled).await
    }

    pub(crate) fn forget(&mut self) {
        self.preferences = Preferences::default();
        self.load_errors.clear();
    }

    async fn persist<T: serde::Serialize + Sync>(&self, key: &str, value: &T) -> TrackerResult<()> {
        let result = save_json(self.storage.as_ref(), key, value).await;
        if let Err(e) = &result {
            warn!(key, error = %e, "Preference kept in memory but not persisted");
        }
        result
    }
}

impl std::fmt::Debug for PreferencesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferencesStore")
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}
