//! Progress summary of a single shift.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TrackerSettings;
use crate::models::Shift;

use super::arrival::{ArrivalStatus, classify_arrival, overtime_hours};
use super::format::format_decimal_hours;

/// Where a shift stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Planned, not checked in yet.
    NotStarted,
    /// Checked in, not checked out yet.
    InProgress,
    /// Both timestamps recorded.
    Completed {
        /// Arrival classification of the check-in.
        arrival: Option<ArrivalStatus>,
        /// Hours worked beyond the expected duration.
        overtime_hours: Decimal,
    },
}

impl ShiftStatus {
    /// Classifies `shift` against the expected windows in `settings`.
    pub fn of(shift: &Shift, settings: &TrackerSettings) -> Self {
        if shift.check_in_time.is_none() {
            return ShiftStatus::NotStarted;
        }
        if shift.check_out_time.is_none() {
            return ShiftStatus::InProgress;
        }
        let window = settings.window(shift.shift_type);
        ShiftStatus::Completed {
            arrival: classify_arrival(
                shift.check_in_time,
                window,
                settings.arrival_tolerance_minutes,
            ),
            overtime_hours: overtime_hours(shift.check_in_time, shift.check_out_time, window),
        }
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftStatus::NotStarted => write!(f, "Not started"),
            ShiftStatus::InProgress => write!(f, "In progress"),
            ShiftStatus::Completed {
                arrival,
                overtime_hours,
            } => {
                write!(f, "Completed")?;
                if *arrival == Some(ArrivalStatus::Late) {
                    write!(f, " (arrived late)")?;
                }
                if *overtime_hours > Decimal::ZERO {
                    write!(f, " +{} overtime", format_decimal_hours(*overtime_hours))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftType;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_planned_shift_not_started() {
        let shift = Shift::planned(ShiftType::Morning, at("2026-01-14 06:00:00"));
        let status = ShiftStatus::of(&shift, &TrackerSettings::default());
        assert_eq!(status, ShiftStatus::NotStarted);
        assert_eq!(status.to_string(), "Not started");
    }

    #[test]
    fn test_active_shift_in_progress() {
        let shift = Shift::checked_in(ShiftType::Morning, at("2026-01-14 08:00:00"));
        assert_eq!(
            ShiftStatus::of(&shift, &TrackerSettings::default()),
            ShiftStatus::InProgress
        );
    }

    #[test]
    fn test_completed_late_with_overtime() {
        let mut shift = Shift::checked_in(ShiftType::Morning, at("2026-01-14 08:20:00"));
        shift.check_out_time = Some(at("2026-01-14 13:20:00"));

        let status = ShiftStatus::of(&shift, &TrackerSettings::default());
        assert_eq!(
            status,
            ShiftStatus::Completed {
                arrival: Some(ArrivalStatus::Late),
                overtime_hours: Decimal::ONE,
            }
        );
        assert_eq!(status.to_string(), "Completed (arrived late) +1h overtime");
    }

    #[test]
    fn test_completed_on_time_plain_text() {
        let mut shift = Shift::checked_in(ShiftType::Afternoon, at("2026-01-14 13:58:00"));
        shift.check_out_time = Some(at("2026-01-14 17:30:00"));
        let status = ShiftStatus::of(&shift, &TrackerSettings::default());
        assert_eq!(status.to_string(), "Completed");
    }
}
