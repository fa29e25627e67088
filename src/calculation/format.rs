//! Display formatting for durations and money.
//!
//! This is the only place where hours and amounts get rounded.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats whole minutes as `Xh`, `Ymin` or `Xh Ymin`.
///
/// # Examples
///
/// ```
/// use shift_tracker::calculation::format_minutes;
///
/// assert_eq!(format_minutes(0), "0h");
/// assert_eq!(format_minutes(45), "45min");
/// assert_eq!(format_minutes(120), "2h");
/// assert_eq!(format_minutes(135), "2h 15min");
/// ```
pub fn format_minutes(total_minutes: i64) -> String {
    if total_minutes <= 0 {
        return "0h".to_string();
    }
    join_hours_minutes(total_minutes / 60, total_minutes % 60)
}

/// Formats decimal hours as `Xh`, `Ymin` or `Xh Ymin`, rounding to the
/// nearest minute.
pub fn format_decimal_hours(hours: Decimal) -> String {
    if hours <= Decimal::ZERO {
        return "0h".to_string();
    }
    let whole = hours.floor();
    let minutes = ((hours - whole) * Decimal::new(60, 0))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0);
    let whole = whole.to_i64().unwrap_or(0);
    if minutes == 60 {
        return join_hours_minutes(whole + 1, 0);
    }
    if whole == 0 && minutes == 0 {
        return "0h".to_string();
    }
    join_hours_minutes(whole, minutes)
}

fn join_hours_minutes(hours: i64, minutes: i64) -> String {
    match (hours, minutes) {
        (0, m) => format!("{m}min"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}min"),
    }
}

/// Formats hours compactly: integers as `24h`, others with one decimal
/// (`24.5h`).
pub fn format_hours_short(hours: Decimal) -> String {
    if hours.fract().is_zero() {
        format!("{}h", hours.trunc().normalize())
    } else {
        let rounded = hours.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.1}h")
    }
}

/// Formats an amount with two decimals after the currency symbol.
///
/// # Example
///
/// ```
/// use shift_tracker::calculation::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::new(2455, 1), "S/"), "S/ 245.50");
/// ```
pub fn format_money(amount: Decimal, currency_symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{currency_symbol} {rounded:.2}")
}
