//! Input validation at the edit boundary.
//!
//! These checks run before anything reaches a store. The stores themselves
//! trust their input.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Shift, ShiftPatch, ShiftType, WorkerConfig};

/// Checks a worker configuration before it is saved.
///
/// The name must not be blank, the hourly rate and every shift duration must
/// be positive, and the weekly template may hold at most one entry per
/// weekday (`0..=6`).
pub fn validate_worker_config(config: &WorkerConfig) -> TrackerResult<()> {
    if config.name.trim().is_empty() {
        return Err(TrackerError::validation("name", "cannot be empty"));
    }
    if config.hourly_rate <= Decimal::ZERO {
        return Err(TrackerError::validation(
            "hourly_rate",
            format!("must be greater than zero, got {}", config.hourly_rate),
        ));
    }
    for shift_type in ShiftType::ALL {
        if config.shift_durations.get(shift_type) <= Decimal::ZERO {
            return Err(TrackerError::validation(
                "shift_durations",
                format!("{} duration must be greater than zero", shift_type.label()),
            ));
        }
    }

    let mut seen = BTreeSet::new();
    for entry in &config.weekly_schedule {
        if entry.day_of_week > 6 {
            return Err(TrackerError::validation(
                "weekly_schedule",
                format!("day of week {} is out of range 0-6", entry.day_of_week),
            ));
        }
        if !seen.insert(entry.day_of_week) {
            return Err(TrackerError::validation(
                "weekly_schedule",
                format!("day of week {} appears more than once", entry.day_of_week),
            ));
        }
    }
    Ok(())
}

/// Checks that a note fits within `max_chars` characters.
pub fn validate_note(note: &str, max_chars: usize) -> TrackerResult<()> {
    let length = note.chars().count();
    if length > max_chars {
        return Err(TrackerError::validation(
            "note",
            format!("{length} characters exceeds the limit of {max_chars}"),
        ));
    }
    Ok(())
}

/// Checks an edit of `current` before it is applied.
///
/// The timestamps the shift would have after the patch must satisfy
/// check-out > check-in when both are present.
pub fn validate_shift_patch(
    current: &Shift,
    patch: &ShiftPatch,
    note_max_chars: usize,
) -> TrackerResult<()> {
    let check_in = patch.check_in_time.or(current.check_in_time);
    let check_out = patch.check_out_time.or(current.check_out_time);
    if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
        if check_out <= check_in {
            return Err(TrackerError::InvalidTimeRange {
                check_in,
                check_out,
            });
        }
    }
    if let Some(note) = &patch.note {
        validate_note(note, note_max_chars)?;
    }
    Ok(())
}
