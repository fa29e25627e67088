//! Work-week boundaries.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The first and last day of a seven-day work week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    /// First day of the week.
    pub start_date: NaiveDate,
    /// Last day of the week, six days after the start.
    pub end_date: NaiveDate,
}

impl WeekWindow {
    /// Returns `true` if `date` falls within the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the window that follows this one.
    pub fn next(&self) -> Self {
        Self::starting(self.start_date + Duration::days(7))
    }

    fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: start_date + Duration::days(6),
        }
    }
}

/// Returns the work week containing `reference`.
///
/// The week starts on the most recent `week_start` weekday on or before
/// `reference`.
///
/// # Example
///
/// ```
/// use shift_tracker::planning::week_window;
/// use chrono::{NaiveDate, Weekday};
///
/// // 2026-01-17 is a Saturday
/// let window = week_window(NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(), Weekday::Wed);
/// assert_eq!(window.start_date, NaiveDate::from_ymd_opt(2026, 1, 14).unwrap());
/// assert_eq!(window.end_date, NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
/// ```
pub fn week_window(reference: NaiveDate, week_start: Weekday) -> WeekWindow {
    let days_back = (7 + reference.weekday().num_days_from_monday()
        - week_start.num_days_from_monday())
        % 7;
    WeekWindow::starting(reference - Duration::days(i64::from(days_back)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_reference_on_week_start() {
        // 2026-01-14 is a Wednesday
        let window = week_window(make_date("2026-01-14"), Weekday::Wed);
        assert_eq!(window.start_date, make_date("2026-01-14"));
        assert_eq!(window.end_date, make_date("2026-01-20"));
    }

    #[test]
    fn test_reference_on_last_day() {
        // 2026-01-20 is a Tuesday
        let window = week_window(make_date("2026-01-20"), Weekday::Wed);
        assert_eq!(window.start_date, make_date("2026-01-14"));
    }

    #[test]
    fn test_reference_early_in_calendar_week() {
        // 2026-01-12 is a Monday, so the week began the previous Wednesday
        let window = week_window(make_date("2026-01-12"), Weekday::Wed);
        assert_eq!(window.start_date, make_date("2026-01-07"));
        assert_eq!(window.end_date, make_date("2026-01-13"));
    }

    #[test]
    fn test_configurable_week_start() {
        let window = week_window(make_date("2026-01-17"), Weekday::Mon);
        assert_eq!(window.start_date, make_date("2026-01-12"));

        let window = week_window(make_date("2026-01-17"), Weekday::Sun);
        assert_eq!(window.start_date, make_date("2026-01-11"));
    }

    #[test]
    fn test_window_crosses_year_boundary() {
        // 2026-01-01 is a Thursday
        let window = week_window(make_date("2026-01-01"), Weekday::Wed);
        assert_eq!(window.start_date, make_date("2025-12-31"));
        assert_eq!(window.end_date, make_date("2026-01-06"));
    }

    #[test]
    fn test_contains_and_next() {
        let window = week_window(make_date("2026-01-14"), Weekday::Wed);
        assert!(window.contains(make_date("2026-01-20")));
        assert!(!window.contains(make_date("2026-01-21")));
        assert_eq!(window.next().start_date, make_date("2026-01-21"));
    }
}
