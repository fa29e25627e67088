//! Day and week models.
//!
//! A [`Week`] always holds exactly seven [`Day`]s, one per calendar day from
//! `start_date` to `end_date` inclusive, in date order.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Shift, ShiftType};

/// Number of days in a work week.
pub const DAYS_PER_WEEK: usize = 7;

/// A calendar day and the shifts recorded on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// The calendar day.
    pub date: NaiveDate,
    /// The day's shifts, at most one per [`ShiftType`].
    #[serde(default)]
    pub shifts: Vec<Shift>,
}

impl Day {
    /// Creates a day with no shifts.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            shifts: Vec::new(),
        }
    }

    /// Returns the shift of the given type, if recorded.
    pub fn shift(&self, shift_type: ShiftType) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.shift_type == shift_type)
    }

    /// Returns a mutable reference to the shift of the given type.
    pub fn shift_mut(&mut self, shift_type: ShiftType) -> Option<&mut Shift> {
        self.shifts.iter_mut().find(|s| s.shift_type == shift_type)
    }

    /// Returns `true` if a shift of the given type is recorded.
    pub fn has_shift(&self, shift_type: ShiftType) -> bool {
        self.shift(shift_type).is_some()
    }

    /// Returns the shift currently checked in, if any.
    pub fn active_shift(&self) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.is_active())
    }
}

/// A seven-day work week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    /// Identifier derived from the start date, see [`week_id`].
    pub id: String,
    /// First day of the week.
    pub start_date: NaiveDate,
    /// Last day of the week (`start_date + 6`).
    pub end_date: NaiveDate,
    /// The seven days in date order.
    pub days: Vec<Day>,
    /// When the week was created.
    pub created_at: NaiveDateTime,
    /// When the week was closed; `None` while it is the current week.
    #[serde(default)]
    pub closed_at: Option<NaiveDateTime>,
}

impl Week {
    /// Returns the day for `date`, if it belongs to this week.
    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Returns a mutable reference to the day for `date`.
    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut Day> {
        self.days.iter_mut().find(|d| d.date == date)
    }

    /// Returns `true` if `date` falls within the week.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns `true` once the week has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    /// Returns every shift of the week in day order.
    pub fn shifts(&self) -> impl Iterator<Item = (&Day, &Shift)> {
        self.days
            .iter()
            .flat_map(|day| day.shifts.iter().map(move |shift| (day, shift)))
    }

    /// Returns the first shift currently checked in, with its day.
    pub fn active_shift(&self) -> Option<(&Day, &Shift)> {
        self.shifts().find(|(_, shift)| shift.is_active())
    }
}

/// Returns the week identifier for a start date (`week_YYYY-MM-DD`).
///
/// # Example
///
/// ```
/// use shift_tracker::models::week_id;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// assert_eq!(week_id(start), "week_2026-01-14");
/// ```
pub fn week_id(start_date: NaiveDate) -> String {
    format!("week_{}", start_date.format("%Y-%m-%d"))
}
