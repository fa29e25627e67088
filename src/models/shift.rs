//! Shift model and related types.
//!
//! This module defines the [`ShiftType`] codes, the timestamp-based [`Shift`]
//! record and the [`ShiftPatch`] used to edit one.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// One of the three fixed daily work periods.
///
/// Serialized with the single-letter codes `M`, `T` and `N`.
///
/// # Example
///
/// ```
/// use shift_tracker::models::ShiftType;
///
/// let shift_type: ShiftType = "t".parse().unwrap();
/// assert_eq!(shift_type, ShiftType::Afternoon);
/// assert_eq!(shift_type.to_string(), "T");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftType {
    /// Morning shift.
    #[serde(rename = "M")]
    Morning,
    /// Afternoon shift.
    #[serde(rename = "T")]
    Afternoon,
    /// Night shift.
    #[serde(rename = "N")]
    Night,
}

impl ShiftType {
    /// All shift types in their daily order.
    pub const ALL: [ShiftType; 3] = [ShiftType::Morning, ShiftType::Afternoon, ShiftType::Night];

    /// Returns the single-letter code of the shift type.
    pub fn code(self) -> &'static str {
        match self {
            ShiftType::Morning => "M",
            ShiftType::Afternoon => "T",
            ShiftType::Night => "N",
        }
    }

    /// Returns the human-readable label of the shift type.
    pub fn label(self) -> &'static str {
        match self {
            ShiftType::Morning => "Morning",
            ShiftType::Afternoon => "Afternoon",
            ShiftType::Night => "Night",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ShiftType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "morning" => Ok(ShiftType::Morning),
            "t" | "afternoon" => Ok(ShiftType::Afternoon),
            "n" | "night" => Ok(ShiftType::Night),
            other => Err(TrackerError::validation(
                "shift_type",
                format!("unknown shift type '{other}', expected M, T or N"),
            )),
        }
    }
}

/// A single shift worked (or planned) on a day.
///
/// A shift is *planned* when neither timestamp is set, *active* once checked
/// in, and *complete* once both timestamps are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    /// The shift type; unique within a day.
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    /// When the worker checked in.
    #[serde(default)]
    pub check_in_time: Option<NaiveDateTime>,
    /// When the worker checked out.
    #[serde(default)]
    pub check_out_time: Option<NaiveDateTime>,
    /// Whether the shift is paid with the extra multiplier.
    #[serde(default)]
    pub is_extra: bool,
    /// Free-form note.
    #[serde(default)]
    pub note: String,
    /// When the shift record was created.
    pub created_at: NaiveDateTime,
    /// When the shift record was last modified.
    pub updated_at: NaiveDateTime,
}

impl Shift {
    /// Creates a planned shift with no timestamps.
    pub fn planned(shift_type: ShiftType, now: NaiveDateTime) -> Self {
        Self {
            shift_type,
            check_in_time: None,
            check_out_time: None,
            is_extra: false,
            note: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a shift already checked in at `now`.
    pub fn checked_in(shift_type: ShiftType, now: NaiveDateTime) -> Self {
        Self {
            check_in_time: Some(now),
            ..Self::planned(shift_type, now)
        }
    }

    /// Returns `true` when checked in but not yet checked out.
    pub fn is_active(&self) -> bool {
        self.check_in_time.is_some() && self.check_out_time.is_none()
    }

    /// Returns `true` when both check-in and check-out are recorded.
    pub fn is_complete(&self) -> bool {
        self.check_in_time.is_some() && self.check_out_time.is_some()
    }

    /// Merges the set fields of `patch` into this shift and stamps `updated_at`.
    ///
    /// No range validation happens here; see
    /// [`validate_shift_patch`](crate::validation::validate_shift_patch).
    pub fn apply(&mut self, patch: &ShiftPatch, now: NaiveDateTime) {
        if let Some(check_in) = patch.check_in_time {
            self.check_in_time = Some(check_in);
        }
        if let Some(check_out) = patch.check_out_time {
            self.check_out_time = Some(check_out);
        }
        if let Some(is_extra) = patch.is_extra {
            self.is_extra = is_extra;
        }
        if let Some(note) = &patch.note {
            self.note = note.clone();
        }
        self.updated_at = now;
    }
}

/// A partial update of a [`Shift`]; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPatch {
    /// New check-in timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<NaiveDateTime>,
    /// New check-out timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<NaiveDateTime>,
    /// New extra-pay flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_extra: Option<bool>,
    /// New note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ShiftPatch {
    /// Returns a patch that sets both timestamps.
    pub fn times(check_in: NaiveDateTime, check_out: NaiveDateTime) -> Self {
        Self {
            check_in_time: Some(check_in),
            check_out_time: Some(check_out),
            ..Self::default()
        }
    }

    /// Sets the extra-pay flag.
    pub fn with_extra(mut self, is_extra: bool) -> Self {
        self.is_extra = Some(is_extra);
        self
    }

    /// Sets the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Returns `true` when the patch sets no field.
    pub fn is_empty(&self) -> bool {
        self.check_in_time.is_none()
            && self.check_out_time.is_none()
            && self.is_extra.is_none()
            && self.note.is_none()
    }
}
