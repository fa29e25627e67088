//! Core data models for the shift tracker.
//!
//! This module contains the persisted documents: worker configuration,
//! shifts, days, weeks and preferences.

mod preferences;
mod shift;
mod week;
mod worker;

pub use preferences::{Preferences, ThemeMode};
pub use shift::{Shift, ShiftPatch, ShiftType};
pub use week::{DAYS_PER_WEEK, Day, Week, week_id};
pub use worker::{
    ScheduleEntry, ShiftDurations, WorkerConfig, WorkerConfigPatch, default_weekly_schedule,
};
