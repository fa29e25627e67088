//! Builds a week from the worker's weekly template.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::config::TrackerSettings;
use crate::models::{
    DAYS_PER_WEEK, Day, ScheduleEntry, Shift, ShiftDurations, ShiftType, Week, week_id,
};

/// Builds the seven-day week starting at `start_date`.
///
/// Each day is seeded with one planned shift per type listed by the template
/// entry for its weekday. Days without an entry, or whose entry is a rest day,
/// stay empty. Planned shifts carry no timestamps and so contribute zero hours
/// until worked.
///
/// # Arguments
///
/// * `start_date` - The first day of the week
/// * `schedule` - The worker's weekly template
/// * `durations` - Planned hours per shift type
/// * `now` - The creation timestamp stamped on the week
///
/// # Returns
///
/// Returns an open `Week` with seven days and no `closed_at`.
///
/// # Example
///
/// ```
/// use shift_tracker::models::{ShiftDurations, default_weekly_schedule};
/// use shift_tracker::planning::build_week;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// let now = start.and_hms_opt(7, 0, 0).unwrap();
/// let week = build_week(start, &default_weekly_schedule(), &ShiftDurations::default(), now);
///
/// assert_eq!(week.days.len(), 7);
/// assert_eq!(week.id, "week_2026-01-14");
/// ```
pub fn build_week(
    start_date: NaiveDate,
    schedule: &[ScheduleEntry],
    durations: &ShiftDurations,
    now: NaiveDateTime,
) -> Week {
    let days: Vec<Day> = (0..DAYS_PER_WEEK as i64)
        .map(|offset| {
            let date = start_date + Duration::days(offset);
            let mut day = Day::new(date);
            if let Some(entry) = schedule.iter().find(|e| e.matches(date.weekday())) {
                if entry.is_work_day {
                    day.shifts = entry
                        .shift_types
                        .iter()
                        .map(|&shift_type| Shift::planned(shift_type, now))
                        .collect();
                }
            }
            day
        })
        .collect();

    let week = Week {
        id: week_id(start_date),
        start_date,
        end_date: start_date + Duration::days(DAYS_PER_WEEK as i64 - 1),
        days,
        created_at: now,
        closed_at: None,
    };

    debug!(
        week_id = %week.id,
        planned_shifts = week.shifts().count(),
        planned_hours = %planned_hours(&week, durations),
        "Built week from template"
    );
    week
}

/// Sums the planned durations of every shift in `week`.
pub fn planned_hours(week: &Week, durations: &ShiftDurations) -> Decimal {
    week.shifts()
        .map(|(_, shift)| durations.get(shift.shift_type))
        .sum()
}

/// Suggests check-in and check-out timestamps for a shift on `date`.
///
/// The check-in is the expected window start and the check-out follows it by
/// the planned duration, so a night shift may end on the next calendar day.
pub fn suggested_times(
    date: NaiveDate,
    shift_type: ShiftType,
    durations: &ShiftDurations,
    settings: &TrackerSettings,
) -> (NaiveDateTime, NaiveDateTime) {
    let check_in = date.and_time(settings.window(shift_type).start);
    let minutes = (durations.get(shift_type) * Decimal::new(60, 0))
        .round()
        .to_i64()
        .unwrap_or(0);
    (check_in, check_in + Duration::minutes(minutes))
}
