//! Error types for the shift tracker.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the tracker can report: store-level rejections,
//! edit-boundary validation, persistence failures and settings loading.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::ShiftType;

/// The main error type for the shift tracker.
///
/// Store operations reject with the shift-level variants and leave state
/// untouched. [`TrackerError::Persistence`] is the exception: it is reported
/// after the in-memory state has already changed and is non-fatal.
///
/// # Example
///
/// ```
/// use shift_tracker::error::TrackerError;
///
/// let error = TrackerError::ConfigNotFound {
///     path: "/missing/tracker.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tracker.yaml");
/// ```
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A shift of the same type already exists on that day.
    #[error("A {shift_type} shift already exists on {date}")]
    DuplicateShift {
        /// The day that already holds the shift.
        date: NaiveDate,
        /// The duplicated shift type.
        shift_type: ShiftType,
    },

    /// Check-out was requested for a shift that was never checked in.
    #[error("No active {shift_type} shift on {date}, check in first")]
    NoActiveShift {
        /// The day of the requested check-out.
        date: NaiveDate,
        /// The shift type of the requested check-out.
        shift_type: ShiftType,
    },

    /// An edit targeted a day or shift that does not exist.
    #[error("No {shift_type} shift found on {date}")]
    ShiftNotFound {
        /// The requested day.
        date: NaiveDate,
        /// The requested shift type.
        shift_type: ShiftType,
    },

    /// The date is not one of the seven days of the current week.
    #[error("{date} is not part of the current week")]
    DateOutsideWeek {
        /// The rejected date.
        date: NaiveDate,
    },

    /// A new week was started while another one is still open.
    #[error("Week '{week_id}' is still open, close or reset it first")]
    WeekAlreadyOpen {
        /// The id of the open week.
        week_id: String,
    },

    /// Check-out is not strictly after check-in.
    #[error("Check-out {check_out} must be after check-in {check_in}")]
    InvalidTimeRange {
        /// The check-in timestamp.
        check_in: NaiveDateTime,
        /// The offending check-out timestamp.
        check_out: NaiveDateTime,
    },

    /// A user-supplied field failed validation.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The worker has not completed setup yet.
    #[error("Worker is not configured, run setup first")]
    NotConfigured,

    /// The master password did not match.
    #[error("Incorrect master password")]
    IncorrectPassword,

    /// The durable store failed to read or write a key.
    #[error("Failed to persist '{key}': {message}")]
    Persistence {
        /// The storage key involved.
        key: String,
        /// A description of the storage failure.
        message: String,
    },

    /// Settings file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Settings file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl TrackerError {
    /// Builds a [`TrackerError::Validation`] for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds a [`TrackerError::Persistence`] for `key`.
    pub fn persistence(key: impl Into<String>, message: impl ToString) -> Self {
        Self::Persistence {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Returns `true` for storage failures, which leave in-memory state intact.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}

/// A type alias for Results that return TrackerError.
pub type TrackerResult<T> = Result<T, TrackerError>;
