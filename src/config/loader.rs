//! Settings loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading tracker
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};
use crate::models::ShiftType;

use super::types::TrackerSettings;

/// Loads and provides access to tracker settings.
///
/// # Example
///
/// ```no_run
/// use shift_tracker::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/tracker.yaml").unwrap();
/// println!("Weeks start on {}", loader.settings().week_start);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    settings: TrackerSettings,
}

impl SettingsLoader {
    /// Loads settings from a YAML file.
    ///
    /// Returns an error if the file is missing, is not valid YAML, or holds
    /// values the tracker cannot work with (non-positive multiplier or
    /// durations, negative tolerance).
    pub fn load<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| TrackerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let settings: TrackerSettings =
            serde_yaml::from_str(&content).map_err(|e| TrackerError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        validate_settings(&settings).map_err(|e| TrackerError::ConfigParseError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        info!(path = %path_str, week_start = %settings.week_start, "Loaded tracker settings");
        Ok(Self { settings })
    }

    /// Loads settings from `path` when given, otherwise uses the defaults.
    pub fn load_or_default(path: Option<&Path>) -> TrackerResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("No settings file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Consumes the loader and returns the settings.
    pub fn into_settings(self) -> TrackerSettings {
        self.settings
    }
}

fn validate_settings(settings: &TrackerSettings) -> TrackerResult<()> {
    if settings.extra_multiplier <= Decimal::ZERO {
        return Err(TrackerError::validation(
            "extra_multiplier",
            "must be greater than zero",
        ));
    }
    if settings.arrival_tolerance_minutes < 0 {
        return Err(TrackerError::validation(
            "arrival_tolerance_minutes",
            "cannot be negative",
        ));
    }
    for shift_type in ShiftType::ALL {
        if settings.window(shift_type).duration_hours <= Decimal::ZERO {
            return Err(TrackerError::validation(
                "shift_windows",
                format!("{shift_type} duration must be greater than zero"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};
    use std::io::Write;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/tracker.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn write_settings(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_bundled_settings() {
        let result = SettingsLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load settings: {:?}", result.err());

        let settings = result.unwrap().into_settings();
        assert_eq!(settings.extra_multiplier, dec("1.5"));
        assert_eq!(settings.week_start, Weekday::Wed);
        assert_eq!(
            settings.window(ShiftType::Morning).start,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
        assert_eq!(settings.default_weekly_schedule.len(), 7);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        match SettingsLoader::load("/nonexistent/tracker.yaml") {
            Err(TrackerError::ConfigNotFound { path }) => {
                assert!(path.contains("tracker.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let file = write_settings("extra_multiplier: [not, a, number]\n");
        assert!(matches!(
            SettingsLoader::load(file.path()),
            Err(TrackerError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_non_positive_multiplier_rejected() {
        let file = write_settings("extra_multiplier: 0\n");
        match SettingsLoader::load(file.path()) {
            Err(TrackerError::ConfigParseError { message, .. }) => {
                assert!(message.contains("extra_multiplier"));
            }
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_or_default_without_path() {
        let loader = SettingsLoader::load_or_default(None).unwrap();
        assert_eq!(loader.settings(), &TrackerSettings::default());
    }
}
