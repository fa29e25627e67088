//! Settings types for the shift tracker.
//!
//! These structures are deserialized from a YAML settings file. Every field
//! has a default, so a partial file only overrides what it names.

use chrono::{NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{DEFAULT_ARRIVAL_TOLERANCE_MINUTES, DEFAULT_EXTRA_MULTIPLIER};
use crate::models::{ScheduleEntry, ShiftDurations, ShiftType, default_weekly_schedule};

/// Expected working window of a shift type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Expected start time of day.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Expected end time of day.
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    /// Expected duration in hours, used for overtime detection.
    pub duration_hours: Decimal,
}

impl ShiftWindow {
    fn new(start: (u32, u32), end: (u32, u32), duration_hours: i64) -> Self {
        Self {
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap_or(NaiveTime::MIN),
            duration_hours: Decimal::new(duration_hours, 0),
        }
    }
}

/// Expected windows for all three shift types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindows {
    /// Morning window.
    #[serde(rename = "M")]
    pub morning: ShiftWindow,
    /// Afternoon window.
    #[serde(rename = "T")]
    pub afternoon: ShiftWindow,
    /// Night window.
    #[serde(rename = "N")]
    pub night: ShiftWindow,
}

impl ShiftWindows {
    /// Returns the window for `shift_type`.
    pub fn get(&self, shift_type: ShiftType) -> &ShiftWindow {
        match shift_type {
            ShiftType::Morning => &self.morning,
            ShiftType::Afternoon => &self.afternoon,
            ShiftType::Night => &self.night,
        }
    }
}

impl Default for ShiftWindows {
    fn default() -> Self {
        Self {
            morning: ShiftWindow::new((8, 0), (12, 0), 4),
            afternoon: ShiftWindow::new((14, 0), (18, 0), 4),
            night: ShiftWindow::new((19, 0), (23, 0), 4),
        }
    }
}

/// Tracker-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Pay multiplier for shifts flagged as extra.
    pub extra_multiplier: Decimal,
    /// Weekday on which each work week starts.
    pub week_start: Weekday,
    /// Minutes either side of the expected start still counted as on time.
    pub arrival_tolerance_minutes: i64,
    /// Maximum number of characters in a shift note.
    pub note_max_length: usize,
    /// Currency symbol used when formatting money.
    pub currency_symbol: String,
    /// Expected windows per shift type.
    pub shift_windows: ShiftWindows,
    /// Hourly rate suggested at setup.
    pub default_hourly_rate: Decimal,
    /// Shift durations suggested at setup.
    pub default_shift_durations: ShiftDurations,
    /// Weekly template suggested at setup.
    pub default_weekly_schedule: Vec<ScheduleEntry>,
}

impl TrackerSettings {
    /// Returns the expected window for `shift_type`.
    pub fn window(&self, shift_type: ShiftType) -> &ShiftWindow {
        self.shift_windows.get(shift_type)
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            extra_multiplier: DEFAULT_EXTRA_MULTIPLIER,
            week_start: Weekday::Wed,
            arrival_tolerance_minutes: DEFAULT_ARRIVAL_TOLERANCE_MINUTES,
            note_max_length: 200,
            currency_symbol: "S/".to_string(),
            shift_windows: ShiftWindows::default(),
            default_hourly_rate: Decimal::new(10, 0),
            default_shift_durations: ShiftDurations::default(),
            default_weekly_schedule: default_weekly_schedule(),
        }
    }
}

/// Serde adapter for `HH:MM` times of day.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}
