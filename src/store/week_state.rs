//! The in-memory week state machine.
//!
//! A week is built from the template, stays current while shifts are
//! recorded against it, and ends either closed (moved into history) or reset
//! (discarded). Closed weeks are never modified again.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Day, Shift, ShiftPatch, ShiftType, Week};

/// The current week and the history of closed weeks.
///
/// Every mutation returns `Ok(true)` when state changed and `Ok(false)` when
/// it was a no-op, which happens for every shift operation while no week is
/// current. Errors leave the state untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekState {
    /// The open week, if any.
    pub current: Option<Week>,
    /// Closed weeks in the order they were closed.
    pub history: Vec<Week>,
}

impl WeekState {
    /// Creates a state from persisted parts.
    pub fn new(current: Option<Week>, history: Vec<Week>) -> Self {
        Self { current, history }
    }

    /// Installs `week` as the current week.
    pub fn start_week(&mut self, week: Week) -> TrackerResult<bool> {
        if let Some(open) = &self.current {
            return Err(TrackerError::WeekAlreadyOpen {
                week_id: open.id.clone(),
            });
        }
        self.current = Some(week);
        Ok(true)
    }

    /// Appends a planned shift to `date`.
    pub fn add_shift(
        &mut self,
        date: NaiveDate,
        shift_type: ShiftType,
        now: NaiveDateTime,
    ) -> TrackerResult<bool> {
        let Some(day) = self.day_in_current(date)? else {
            return Ok(false);
        };
        if day.has_shift(shift_type) {
            return Err(TrackerError::DuplicateShift { date, shift_type });
        }
        day.shifts.push(Shift::planned(shift_type, now));
        Ok(true)
    }

    /// Records a check-in at `now`, creating the shift if it does not exist.
    ///
    /// Checking in again overwrites the previous check-in time.
    pub fn check_in(
        &mut self,
        date: NaiveDate,
        shift_type: ShiftType,
        now: NaiveDateTime,
    ) -> TrackerResult<bool> {
        let Some(day) = self.day_in_current(date)? else {
            return Ok(false);
        };
        match day.shift_mut(shift_type) {
            Some(shift) => {
                shift.check_in_time = Some(now);
                shift.updated_at = now;
            }
            None => day.shifts.push(Shift::checked_in(shift_type, now)),
        }
        Ok(true)
    }

    /// Records a check-out at `now` on a checked-in shift.
    pub fn check_out(
        &mut self,
        date: NaiveDate,
        shift_type: ShiftType,
        now: NaiveDateTime,
    ) -> TrackerResult<bool> {
        let Some(week) = self.current.as_mut() else {
            return Ok(false);
        };
        let shift = week
            .day_mut(date)
            .and_then(|day| day.shift_mut(shift_type))
            .filter(|shift| shift.check_in_time.is_some())
            .ok_or(TrackerError::NoActiveShift { date, shift_type })?;
        shift.check_out_time = Some(now);
        shift.updated_at = now;
        Ok(true)
    }

    /// Merges `patch` into an existing shift.
    pub fn update_shift(
        &mut self,
        date: NaiveDate,
        shift_type: ShiftType,
        patch: &ShiftPatch,
        now: NaiveDateTime,
    ) -> TrackerResult<bool> {
        let Some(week) = self.current.as_mut() else {
            return Ok(false);
        };
        let shift = week
            .day_mut(date)
            .and_then(|day| day.shift_mut(shift_type))
            .ok_or(TrackerError::ShiftNotFound { date, shift_type })?;
        shift.apply(patch, now);
        Ok(true)
    }

    /// Removes a shift; removing an absent shift changes nothing.
    pub fn delete_shift(&mut self, date: NaiveDate, shift_type: ShiftType) -> bool {
        let Some(day) = self.current.as_mut().and_then(|w| w.day_mut(date)) else {
            return false;
        };
        let before = day.shifts.len();
        day.shifts.retain(|s| s.shift_type != shift_type);
        day.shifts.len() != before
    }

    /// Stamps `closed_at`, moves the current week into history and returns
    /// its id.
    pub fn close_week(&mut self, now: NaiveDateTime) -> Option<String> {
        let mut week = self.current.take()?;
        week.closed_at = Some(now);
        let id = week.id.clone();
        self.history.push(week);
        Some(id)
    }

    /// Discards the current week without archiving it.
    pub fn reset_current_week(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Empties the history.
    pub fn clear_history(&mut self) -> bool {
        let changed = !self.history.is_empty();
        self.history.clear();
        changed
    }

    /// Returns closed weeks, most recently closed first.
    pub fn history_recent_first(&self) -> impl Iterator<Item = &Week> {
        self.history.iter().rev()
    }

    fn day_in_current(&mut self, date: NaiveDate) -> TrackerResult<Option<&mut Day>> {
        let Some(week) = self.current.as_mut() else {
            return Ok(None);
        };
        week.day_mut(date)
            .map(Some)
            .ok_or(TrackerError::DateOutsideWeek { date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShiftDurations, default_weekly_schedule};
    use crate::planning::build_week;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn open_state() -> WeekState {
        let mut state = WeekState::default();
        let week = build_week(
            make_date("2026-01-14"),
            &default_weekly_schedule(),
            &ShiftDurations::default(),
            at("2026-01-14 07:00:00"),
        );
        state.start_week(week).unwrap();
        state
    }

    #[test]
    fn test_operations_without_week_are_noops() {
        let mut state = WeekState::default();
        let date = make_date("2026-01-14");
        let now = at("2026-01-14 08:00:00");

        assert!(!state.add_shift(date, ShiftType::Morning, now).unwrap());
        assert!(!state.check_in(date, ShiftType::Morning, now).unwrap());
        assert!(!state.check_out(date, ShiftType::Morning, now).unwrap());
        assert!(!state.update_shift(date, ShiftType::Morning, &ShiftPatch::default(), now).unwrap());
        assert!(!state.delete_shift(date, ShiftType::Morning));
        assert!(state.close_week(now).is_none());
        assert_eq!(state, WeekState::default());
    }

    #[test]
    fn test_start_week_rejects_second_open_week() {
        let mut state = open_state();
        let week = state.current.clone().unwrap();
        let err = state.start_week(week).unwrap_err();
        assert!(matches!(err, TrackerError::WeekAlreadyOpen { .. }));
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut state = open_state();
        let before = state.clone();
        // Wednesday already has a planned morning shift
        let err = state
            .add_shift(make_date("2026-01-14"), ShiftType::Morning, at("2026-01-14 07:30:00"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateShift { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_add_outside_week_rejected() {
        let mut state = open_state();
        let err = state
            .add_shift(make_date("2026-01-21"), ShiftType::Night, at("2026-01-14 07:30:00"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::DateOutsideWeek { .. }));
    }

    #[test]
    fn test_check_in_creates_missing_shift() {
        let mut state = open_state();
        let thursday = make_date("2026-01-15");
        state.check_in(thursday, ShiftType::Night, at("2026-01-15 19:02:00")).unwrap();

        let week = state.current.as_ref().unwrap();
        let shift = week.day(thursday).unwrap().shift(ShiftType::Night).unwrap();
        assert!(shift.is_active());
    }

    #[test]
    fn test_check_in_again_overwrites_time() {
        let mut state = open_state();
        let date = make_date("2026-01-14");
        state.check_in(date, ShiftType::Morning, at("2026-01-14 08:00:00")).unwrap();
        state.check_in(date, ShiftType::Morning, at("2026-01-14 08:45:00")).unwrap();

        let week = state.current.as_ref().unwrap();
        let day = week.day(date).unwrap();
        assert_eq!(day.shifts.len(), 1);
        assert_eq!(
            day.shift(ShiftType::Morning).unwrap().check_in_time,
            Some(at("2026-01-14 08:45:00"))
        );
    }

    #[test]
    fn test_check_out_requires_check_in() {
        let mut state = open_state();
        let before = state.clone();
        let date = make_date("2026-01-14");

        // planned but never checked in
        let err = state
            .check_out(date, ShiftType::Morning, at("2026-01-14 12:00:00"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::NoActiveShift { .. }));

        // not present at all
        let err = state
            .check_out(date, ShiftType::Night, at("2026-01-14 23:00:00"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::NoActiveShift { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_update_missing_shift_rejected() {
        let mut state = open_state();
        let err = state
            .update_shift(
                make_date("2026-01-15"),
                ShiftType::Morning,
                &ShiftPatch::default().with_extra(true),
                at("2026-01-15 09:00:00"),
            )
            .unwrap_err();
        assert!(matches!(err, TrackerError::ShiftNotFound { .. }));
    }

    #[test]
    fn test_update_merges_and_stamps() {
        let mut state = open_state();
        let date = make_date("2026-01-14");
        let now = at("2026-01-14 13:00:00");
        state
            .update_shift(date, ShiftType::Morning, &ShiftPatch::default().with_note("cover"), now)
            .unwrap();

        let shift = state.current.as_ref().unwrap().day(date).unwrap().shift(ShiftType::Morning).unwrap();
        assert_eq!(shift.note, "cover");
        assert!(!shift.is_extra);
        assert_eq!(shift.updated_at, now);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut state = open_state();
        let date = make_date("2026-01-15");
        assert!(!state.delete_shift(date, ShiftType::Morning));
        assert!(state.delete_shift(make_date("2026-01-14"), ShiftType::Morning));
    }

    #[test]
    fn test_close_moves_week_to_history() {
        let mut state = open_state();
        let closed_at = at("2026-01-20 23:30:00");
        let id = state.close_week(closed_at).unwrap();

        assert_eq!(id, "week_2026-01-14");
        assert!(state.current.is_none());
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].closed_at, Some(closed_at));
    }

    #[test]
    fn test_history_recent_first() {
        let mut state = open_state();
        state.close_week(at("2026-01-20 23:00:00")).unwrap();
        let next = build_week(
            make_date("2026-01-21"),
            &default_weekly_schedule(),
            &ShiftDurations::default(),
            at("2026-01-21 07:00:00"),
        );
        state.start_week(next).unwrap();
        state.close_week(at("2026-01-27 23:00:00")).unwrap();

        let ids: Vec<&str> = state.history_recent_first().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["week_2026-01-21", "week_2026-01-14"]);
    }

    #[test]
    fn test_reset_and_clear_history() {
        let mut state = open_state();
        assert!(state.reset_current_week());
        assert!(state.current.is_none());
        assert!(state.history.is_empty());
        assert!(!state.reset_current_week());

        let mut state = open_state();
        state.close_week(at("2026-01-20 23:00:00"));
        assert!(state.clear_history());
        assert!(!state.clear_history());
    }
}
