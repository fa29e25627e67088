//! Hours and pay per shift, day and week.
//!
//! All functions are pure and apply no rounding; amounts are rounded only when
//! formatted for display.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Day, Shift, Week, WorkerConfig};

use super::time::hours_between;

/// Default multiplier for shifts flagged as extra (150%).
pub const DEFAULT_EXTRA_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// The hourly rate and extra multiplier used to price shifts.
///
/// # Example
///
/// ```
/// use shift_tracker::calculation::PayRate;
/// use rust_decimal::Decimal;
///
/// let rate = PayRate::new(Decimal::new(10, 0));
/// assert_eq!(rate.extra_hourly(), Decimal::new(15, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRate {
    /// Normal pay per hour.
    pub hourly: Decimal,
    /// Multiplier applied to extra shifts.
    pub extra_multiplier: Decimal,
}

impl PayRate {
    /// Creates a rate with the default extra multiplier.
    pub fn new(hourly: Decimal) -> Self {
        Self {
            hourly,
            extra_multiplier: DEFAULT_EXTRA_MULTIPLIER,
        }
    }

    /// Replaces the extra multiplier.
    pub fn with_extra_multiplier(mut self, extra_multiplier: Decimal) -> Self {
        self.extra_multiplier = extra_multiplier;
        self
    }

    /// Builds the rate for a configured worker.
    pub fn for_worker(config: &WorkerConfig, extra_multiplier: Decimal) -> Self {
        Self::new(config.hourly_rate).with_extra_multiplier(extra_multiplier)
    }

    /// Returns the effective hourly rate for extra shifts.
    pub fn extra_hourly(&self) -> Decimal {
        self.hourly * self.extra_multiplier
    }
}

/// Hours and pay split into normal and extra buckets.
///
/// `total_hours == normal_hours + extra_hours` and
/// `total_pay == normal_pay + extra_pay` always hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStats {
    /// All hours worked.
    pub total_hours: Decimal,
    /// Hours on shifts paid at the normal rate.
    pub normal_hours: Decimal,
    /// Hours on shifts flagged as extra.
    pub extra_hours: Decimal,
    /// All pay earned.
    pub total_pay: Decimal,
    /// Pay from normal shifts.
    pub normal_pay: Decimal,
    /// Pay from extra shifts.
    pub extra_pay: Decimal,
}

impl Add for PayStats {
    type Output = PayStats;

    fn add(mut self, rhs: PayStats) -> PayStats {
        self += rhs;
        self
    }
}

impl AddAssign for PayStats {
    fn add_assign(&mut self, rhs: PayStats) {
        self.total_hours += rhs.total_hours;
        self.normal_hours += rhs.normal_hours;
        self.extra_hours += rhs.extra_hours;
        self.total_pay += rhs.total_pay;
        self.normal_pay += rhs.normal_pay;
        self.extra_pay += rhs.extra_pay;
    }
}

impl Sum for PayStats {
    fn sum<I: Iterator<Item = PayStats>>(iter: I) -> Self {
        iter.fold(PayStats::default(), Add::add)
    }
}

/// Returns the hours worked on a shift; zero until it is complete.
///
/// # Example
///
/// ```
/// use shift_tracker::calculation::shift_hours;
/// use shift_tracker::models::{Shift, ShiftType};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let mut shift = Shift::checked_in(ShiftType::Morning, at("2026-01-14 08:30:00"));
/// assert_eq!(shift_hours(&shift), Decimal::ZERO);
///
/// shift.check_out_time = Some(at("2026-01-14 12:30:00"));
/// assert_eq!(shift_hours(&shift), Decimal::new(4, 0));
/// ```
pub fn shift_hours(shift: &Shift) -> Decimal {
    if !shift.is_complete() {
        return Decimal::ZERO;
    }
    hours_between(shift.check_in_time, shift.check_out_time)
}

/// Returns the pay earned on a shift.
///
/// # Arguments
///
/// * `shift` - The shift to price; incomplete shifts earn nothing
/// * `rate` - The worker's hourly rate and extra-shift multiplier
///
/// # Returns
///
/// Returns the worked hours multiplied by the normal rate, or by the extra
/// rate when the shift is marked as extra.
pub fn shift_pay(shift: &Shift, rate: &PayRate) -> Decimal {
    let hourly = if shift.is_extra {
        rate.extra_hourly()
    } else {
        rate.hourly
    };
    shift_hours(shift) * hourly
}

/// Returns the stats of a single shift, bucketed by its extra flag.
pub fn shift_stats(shift: &Shift, rate: &PayRate) -> PayStats {
    let hours = shift_hours(shift);
    let pay = shift_pay(shift, rate);
    if shift.is_extra {
        PayStats {
            total_hours: hours,
            extra_hours: hours,
            total_pay: pay,
            extra_pay: pay,
            ..PayStats::default()
        }
    } else {
        PayStats {
            total_hours: hours,
            normal_hours: hours,
            total_pay: pay,
            normal_pay: pay,
            ..PayStats::default()
        }
    }
}

/// Sums the stats of every shift on a day.
///
/// # Arguments
///
/// * `day` - The day whose shifts are summed
/// * `rate` - The worker's hourly rate and extra-shift multiplier
///
/// # Returns
///
/// Returns a `PayStats` with hours and pay split into normal and extra.
pub fn day_stats(day: &Day, rate: &PayRate) -> PayStats {
    day.shifts.iter().map(|shift| shift_stats(shift, rate)).sum()
}

/// Sums the stats of every day in a week.
///
/// # Returns
///
/// Returns a `PayStats` totalling every day of `week` at `rate`.
pub fn week_stats(week: &Week, rate: &PayRate) -> PayStats {
    week.days.iter().map(|day| day_stats(day, rate)).sum()
}
