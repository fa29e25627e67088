//! Arrival timeliness and overtime relative to a shift's expected window.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ShiftWindow, ShiftWindows};
use crate::models::ShiftType;

use super::time::minutes_between;

/// Default tolerance, in minutes, around the expected start.
pub const DEFAULT_ARRIVAL_TOLERANCE_MINUTES: i64 = 5;

/// How a check-in compares to the shift's expected start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrivalStatus {
    /// More than the tolerance before the expected start.
    Early,
    /// Within the tolerance either side of the expected start.
    OnTime,
    /// More than the tolerance after the expected start.
    Late,
}

impl std::fmt::Display for ArrivalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArrivalStatus::Early => write!(f, "early"),
            ArrivalStatus::OnTime => write!(f, "on time"),
            ArrivalStatus::Late => write!(f, "late"),
        }
    }
}

/// Returns the built-in expected window for `shift_type`.
///
/// | Type | Start | End   | Hours |
/// |------|-------|-------|-------|
/// | M    | 08:00 | 12:00 | 4     |
/// | T    | 14:00 | 18:00 | 4     |
/// | N    | 19:00 | 23:00 | 4     |
pub fn expected_window(shift_type: ShiftType) -> ShiftWindow {
    ShiftWindows::default().get(shift_type).clone()
}

/// Classifies a check-in against the expected start of `window`.
///
/// The expected start is placed on the check-in's own calendar day. A
/// check-in exactly `tolerance_minutes` away from it is still on time.
///
/// # Arguments
///
/// * `check_in` - The recorded check-in, if any
/// * `window` - The expected window of the shift's type
/// * `tolerance_minutes` - How far from the expected start still counts as on time
///
/// # Returns
///
/// Returns the `ArrivalStatus` of the check-in, or `None` when there is no
/// check-in.
///
/// # Example
///
/// ```
/// use shift_tracker::calculation::{classify_arrival, expected_window, ArrivalStatus};
/// use shift_tracker::models::ShiftType;
/// use chrono::NaiveDateTime;
///
/// let check_in = NaiveDateTime::parse_from_str("2026-01-14 08:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let window = expected_window(ShiftType::Morning);
///
/// assert_eq!(classify_arrival(Some(check_in), &window, 5), Some(ArrivalStatus::Late));
/// assert_eq!(classify_arrival(None, &window, 5), None);
/// ```
pub fn classify_arrival(
    check_in: Option<NaiveDateTime>,
    window: &ShiftWindow,
    tolerance_minutes: i64,
) -> Option<ArrivalStatus> {
    let check_in = check_in?;
    let expected_start = check_in.date().and_time(window.start);
    let difference = check_in - expected_start;
    let tolerance = Duration::minutes(tolerance_minutes);

    if difference < -tolerance {
        Some(ArrivalStatus::Early)
    } else if difference <= tolerance {
        Some(ArrivalStatus::OnTime)
    } else {
        Some(ArrivalStatus::Late)
    }
}

/// Returns the decimal hours worked beyond the window's expected duration.
///
/// Zero when either timestamp is missing or the shift was not longer than
/// expected.
pub fn overtime_hours(
    check_in: Option<NaiveDateTime>,
    check_out: Option<NaiveDateTime>,
    window: &ShiftWindow,
) -> Decimal {
    if check_in.is_none() || check_out.is_none() {
        return Decimal::ZERO;
    }
    let worked_minutes = Decimal::new(minutes_between(check_in, check_out), 0);
    let expected_minutes = window.duration_hours * Decimal::new(60, 0);
    let overtime_minutes = (worked_minutes - expected_minutes).max(Decimal::ZERO);
    overtime_minutes / Decimal::new(60, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(s: &str) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
    }

    fn morning() -> ShiftWindow {
        expected_window(ShiftType::Morning)
    }

    #[test]
    fn test_exactly_on_time() {
        assert_eq!(
            classify_arrival(at("2026-01-14 08:00:00"), &morning(), 5),
            Some(ArrivalStatus::OnTime)
        );
    }

    #[test]
    fn test_exactly_five_minutes_early_is_on_time() {
        assert_eq!(
            classify_arrival(at("2026-01-14 07:55:00"), &morning(), 5),
            Some(ArrivalStatus::OnTime)
        );
    }

    #[test]
    fn test_five_minutes_one_second_early_is_early() {
        assert_eq!(
            classify_arrival(at("2026-01-14 07:54:59"), &morning(), 5),
            Some(ArrivalStatus::Early)
        );
    }

    #[test]
    fn test_exactly_five_minutes_late_is_on_time() {
        assert_eq!(
            classify_arrival(at("2026-01-14 08:05:00"), &morning(), 5),
            Some(ArrivalStatus::OnTime)
        );
    }

    #[test]
    fn test_five_minutes_one_second_late_is_late() {
        assert_eq!(
            classify_arrival(at("2026-01-14 08:05:01"), &morning(), 5),
            Some(ArrivalStatus::Late)
        );
    }

    #[test]
    fn test_expected_start_uses_check_in_day() {
        // Same clock time on a different date must classify identically.
        assert_eq!(
            classify_arrival(at("2031-07-02 14:20:00"), &expected_window(ShiftType::Afternoon), 5),
            Some(ArrivalStatus::Late)
        );
    }

    #[test]
    fn test_missing_check_in_is_none() {
        assert_eq!(classify_arrival(None, &morning(), 5), None);
    }

    #[test]
    fn test_zero_tolerance() {
        assert_eq!(
            classify_arrival(at("2026-01-14 08:00:01"), &morning(), 0),
            Some(ArrivalStatus::Late)
        );
    }

    #[test]
    fn test_overtime_beyond_expected_duration() {
        assert_eq!(
            overtime_hours(at("2026-01-14 08:00:00"), at("2026-01-14 13:30:00"), &morning()),
            dec("1.5")
        );
    }

    #[test]
    fn test_no_overtime_for_short_shift() {
        assert_eq!(
            overtime_hours(at("2026-01-14 08:00:00"), at("2026-01-14 11:00:00"), &morning()),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_overtime_missing_check_out_is_zero() {
        assert_eq!(
            overtime_hours(at("2026-01-14 08:00:00"), None, &morning()),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_arrival_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ArrivalStatus::OnTime).unwrap(), "\"ontime\"");
    }
}
