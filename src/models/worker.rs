//! Worker configuration model.
//!
//! This module contains the [`WorkerConfig`] captured at first-run setup, its
//! weekly shift template ([`ScheduleEntry`]) and the planned duration of each
//! shift type ([`ShiftDurations`]).

use std::collections::BTreeSet;

use chrono::{NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ShiftType;

/// Planned duration in hours for each shift type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDurations {
    /// Morning shift hours.
    #[serde(rename = "M")]
    pub morning: Decimal,
    /// Afternoon shift hours.
    #[serde(rename = "T")]
    pub afternoon: Decimal,
    /// Night shift hours.
    #[serde(rename = "N")]
    pub night: Decimal,
}

impl ShiftDurations {
    /// Returns the planned hours for `shift_type`.
    pub fn get(&self, shift_type: ShiftType) -> Decimal {
        match shift_type {
            ShiftType::Morning => self.morning,
            ShiftType::Afternoon => self.afternoon,
            ShiftType::Night => self.night,
        }
    }
}

impl Default for ShiftDurations {
    fn default() -> Self {
        let four = Decimal::new(4, 0);
        Self {
            morning: four,
            afternoon: four,
            night: four,
        }
    }
}

/// One weekday of the weekly shift template.
///
/// `day_of_week` counts from Sunday (`0`) to Saturday (`6`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Weekday index, `0` = Sunday.
    pub day_of_week: u8,
    /// Whether the worker works on this weekday.
    pub is_work_day: bool,
    /// Shift types planned for this weekday.
    #[serde(default)]
    pub shift_types: BTreeSet<ShiftType>,
}

impl ScheduleEntry {
    /// Creates a work day with the given shifts.
    pub fn work_day(day_of_week: u8, shift_types: impl IntoIterator<Item = ShiftType>) -> Self {
        Self {
            day_of_week,
            is_work_day: true,
            shift_types: shift_types.into_iter().collect(),
        }
    }

    /// Creates a rest day.
    pub fn rest_day(day_of_week: u8) -> Self {
        Self {
            day_of_week,
            is_work_day: false,
            shift_types: BTreeSet::new(),
        }
    }

    /// Returns `true` if this entry describes `weekday`.
    pub fn matches(&self, weekday: Weekday) -> bool {
        u32::from(self.day_of_week) == weekday.num_days_from_sunday()
    }
}

/// Returns the default weekly template: one morning shift every day except a
/// Thursday rest day, and afternoon plus night on Saturday.
pub fn default_weekly_schedule() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry::work_day(0, [ShiftType::Morning]),
        ScheduleEntry::work_day(1, [ShiftType::Morning]),
        ScheduleEntry::work_day(2, [ShiftType::Morning]),
        ScheduleEntry::work_day(3, [ShiftType::Morning]),
        ScheduleEntry::rest_day(4),
        ScheduleEntry::work_day(5, [ShiftType::Morning]),
        ScheduleEntry::work_day(6, [ShiftType::Afternoon, ShiftType::Night]),
    ]
}

/// The worker's personal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerConfig {
    /// Display name.
    pub name: String,
    /// Pay per hour; always positive.
    pub hourly_rate: Decimal,
    /// Planned duration of each shift type.
    #[serde(default)]
    pub shift_durations: ShiftDurations,
    /// Weekly shift template.
    #[serde(default = "default_weekly_schedule")]
    pub weekly_schedule: Vec<ScheduleEntry>,
    /// Set once first-run setup finished.
    #[serde(default)]
    pub setup_completed: bool,
    /// When the configuration was first saved.
    pub created_at: NaiveDateTime,
    /// When the configuration was last updated.
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl WorkerConfig {
    /// Creates a completed configuration with default durations and template.
    pub fn new(name: impl Into<String>, hourly_rate: Decimal, now: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            hourly_rate,
            shift_durations: ShiftDurations::default(),
            weekly_schedule: default_weekly_schedule(),
            setup_completed: true,
            created_at: now,
            updated_at: None,
        }
    }

    /// Returns the template entry for `weekday`, if any.
    pub fn schedule_for(&self, weekday: Weekday) -> Option<&ScheduleEntry> {
        self.weekly_schedule.iter().find(|e| e.matches(weekday))
    }

    /// Merges the set fields of `patch` and stamps `updated_at`.
    pub fn apply(&mut self, patch: WorkerConfigPatch, now: NaiveDateTime) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(rate) = patch.hourly_rate {
            self.hourly_rate = rate;
        }
        if let Some(durations) = patch.shift_durations {
            self.shift_durations = durations;
        }
        if let Some(schedule) = patch.weekly_schedule {
            self.weekly_schedule = schedule;
        }
        self.updated_at = Some(now);
    }
}

/// A partial update of a [`WorkerConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerConfigPatch {
    /// New display name.
    pub name: Option<String>,
    /// New hourly rate.
    pub hourly_rate: Option<Decimal>,
    /// New shift durations.
    pub shift_durations: Option<ShiftDurations>,
    /// New weekly template.
    pub weekly_schedule: Option<Vec<ScheduleEntry>>,
}
