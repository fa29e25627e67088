//! Calculation logic for the shift tracker.
//!
//! This module contains the pure functions behind every number the tracker
//! shows: durations between check-in and check-out, arrival classification
//! and overtime against the expected shift window, per-shift, per-day and
//! per-week pay split into normal and extra buckets, and display formatting.

mod arrival;
mod format;
mod pay;
mod status;
mod time;

pub use arrival::{
    ArrivalStatus, DEFAULT_ARRIVAL_TOLERANCE_MINUTES, classify_arrival, expected_window,
    overtime_hours,
};
pub use format::{format_decimal_hours, format_hours_short, format_minutes, format_money};
pub use pay::{
    DEFAULT_EXTRA_MULTIPLIER, PayRate, PayStats, day_stats, shift_hours, shift_pay, shift_stats,
    week_stats,
};
pub use status::ShiftStatus;
pub use time::{
    active_minutes, hours_between, minutes_between, minutes_to_hours, round_to_nearest_five,
};
