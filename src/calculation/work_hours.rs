//! Worked hour calculation.
//!
//! Worked hours are the span between clock-in and clock-out minus the meal
//! deduction, floored at zero. No rounding happens here; the month
//! aggregator rounds totals once.

use rust_decimal::Decimal;

use crate::config::WorkHoursConfig;
use crate::models::{ClockTime, LeaveType};

use super::meal_deduction::calculate_meal_deduction;

const MINUTES_PER_HOUR: i64 = 60;

/// Converts whole minutes into exact decimal hours.
pub fn hours_from_minutes(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR)
}

/// The result of a worked hour calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkedHoursResult {
    /// Clock-out minus clock-in, in hours. Zero when degenerate.
    pub raw_hours: Decimal,
    /// Meal time deducted.
    pub meal_deduction: Decimal,
    /// Hours worked (never negative).
    pub worked_hours: Decimal,
    /// Set when clock-out preceded clock-in without a next-day marker.
    pub degenerate: bool,
}

impl WorkedHoursResult {
    const DEGENERATE: Self = Self {
        raw_hours: Decimal::ZERO,
        meal_deduction: Decimal::ZERO,
        worked_hours: Decimal::ZERO,
        degenerate: true,
    };
}

/// Calculates the hours worked between two punches.
///
/// The raw span adds 24 hours when clock-out carries a next-day marker.
/// A span that is still negative is reported as degenerate with zero hours.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::calculate_worked_hours;
/// use worktime_engine::config::WorkHoursConfig;
/// use worktime_engine::models::{ClockTime, LeaveType};
/// use rust_decimal::Decimal;
///
/// let config = WorkHoursConfig::default();
/// let result = calculate_worked_hours(
///     ClockTime::at(9, 0).unwrap(),
///     ClockTime::at(20, 0).unwrap(),
///     LeaveType::None,
///     &config,
/// );
/// assert_eq!(result.raw_hours, Decimal::from(11));
/// assert_eq!(result.worked_hours, Decimal::new(95, 1));
/// ```
pub fn calculate_worked_hours(
    clock_in: ClockTime,
    clock_out: ClockTime,
    leave_type: LeaveType,
    config: &WorkHoursConfig,
) -> WorkedHoursResult {
    let minutes = clock_out.minutes_from_day_start() - clock_in.minutes_from_day_start();
    if minutes < 0 {
        return WorkedHoursResult::DEGENERATE;
    }

    let raw_hours = hours_from_minutes(minutes);
    let deduction = calculate_meal_deduction(clock_out, leave_type, config).hours;
    let worked_hours = (raw_hours - deduction).max(Decimal::ZERO);

    WorkedHoursResult {
        raw_hours,
        meal_deduction: deduction,
        worked_hours,
        degenerate: false,
    }
}
