//! Time arithmetic between check-in and check-out timestamps.
//!
//! Every function treats a missing timestamp as "not yet computable" and
//! returns zero instead of failing.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Returns the decimal hours from `start` to `end`, floored at zero.
///
/// # Examples
///
/// ```
/// use shift_tracker::calculation::hours_between;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2026-01-14 08:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-01-14 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// assert_eq!(hours_between(Some(start), Some(end)), Decimal::new(35, 1));
/// assert_eq!(hours_between(Some(start), None), Decimal::ZERO);
/// ```
pub fn hours_between(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Decimal {
    let (Some(start), Some(end)) = (start, end) else {
        return Decimal::ZERO;
    };
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return Decimal::ZERO;
    }
    Decimal::new(millis, 0) / Decimal::new(MILLIS_PER_HOUR, 0)
}

/// Returns the whole minutes from `start` to `end`, floored at zero.
pub fn minutes_between(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> i64 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0;
    };
    let millis = (end - start).num_milliseconds();
    millis.div_euclid(MILLIS_PER_MINUTE).max(0)
}

/// Returns the minutes elapsed since `check_in`, for the live timer of an
/// active shift.
pub fn active_minutes(check_in: Option<NaiveDateTime>, now: NaiveDateTime) -> i64 {
    minutes_between(check_in, Some(now))
}

/// Converts whole minutes to decimal hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

/// Rounds minutes to the nearest multiple of five.
pub fn round_to_nearest_five(minutes: i64) -> i64 {
    (minutes + 2).div_euclid(5) * 5
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

    #[test]
    fn test_hours_between_four_hour_shift() {
        assert_eq!(
            hours_between(at("2026-01-14 08:30:00"), at("2026-01-14 12:30:00")),
            dec("4")
        );
    }

    #[test]
    fn test_hours_between_overnight() {
        assert_eq!(
            hours_between(at("2026-01-14 22:00:00"), at("2026-01-15 06:15:00")),
            dec("8.25")
        );
    }

    #[test]
    fn test_hours_between_reversed_is_zero() {
        assert_eq!(
            hours_between(at("2026-01-14 12:00:00"), at("2026-01-14 08:00:00")),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_hours_between_missing_input_is_zero() {
        assert_eq!(hours_between(None, at("2026-01-14 08:00:00")), Decimal::ZERO);
        assert_eq!(hours_between(None, None), Decimal::ZERO);
    }

    #[test]
    fn test_hours_between_keeps_seconds() {
        // 90 seconds
        assert_eq!(
            hours_between(at("2026-01-14 08:00:00"), at("2026-01-14 08:01:30")),
            dec("0.025")
        );
    }

    #[test]
    fn test_minutes_between_floors() {
        assert_eq!(
            minutes_between(at("2026-01-14 08:00:00"), at("2026-01-14 08:01:59")),
            1
        );
        assert_eq!(
            minutes_between(at("2026-01-14 08:00:00"), at("2026-01-14 07:00:00")),
            0
        );
        assert_eq!(minutes_between(at("2026-01-14 08:00:00"), None), 0);
    }

    #[test]
    fn test_active_minutes() {
        let now = at("2026-01-14 09:45:30").unwrap();
        assert_eq!(active_minutes(at("2026-01-14 08:00:00"), now), 105);
        assert_eq!(active_minutes(None, now), 0);
    }

    #[test]
    fn test_minutes_to_hours() {
        assert_eq!(minutes_to_hours(90), dec("1.5"));
        assert_eq!(minutes_to_hours(0), Decimal::ZERO);
    }

    #[test]
    fn test_round_to_nearest_five() {
        assert_eq!(round_to_nearest_five(0), 0);
        assert_eq!(round_to_nearest_five(7), 5);
        assert_eq!(round_to_nearest_five(8), 10);
        assert_eq!(round_to_nearest_five(12), 10);
        assert_eq!(round_to_nearest_five(-3), -5);
    }
}
