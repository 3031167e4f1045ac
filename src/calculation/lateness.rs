//! Late arrival detection.

use chrono::Timelike;

use crate::config::WorkHoursConfig;
use crate::models::{DailyRecord, LeaveType};

/// Returns the minutes late for a day, or `None` if the day is not late.
///
/// A day is late when all of the following hold:
///
/// - it is a workday with a clock-in punch
/// - the clock-in is strictly after the standard start
/// - the clock-in is strictly before the late cutoff, since later arrivals
///   are treated as half-day absences
/// - the day carries no leave
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::detect_lateness;
/// use worktime_engine::config::WorkHoursConfig;
/// use worktime_engine::models::{ClockTime, DailyRecord, LeaveType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = DailyRecord {
///     date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     weekday: "星期一".to_string(),
///     clock_in: ClockTime::at(9, 12),
///     clock_out: ClockTime::at(18, 30),
///     is_workday: true,
///     is_holiday: false,
///     is_makeup_workday: false,
///     leave_type: LeaveType::None,
///     leave_start: None,
///     leave_end: None,
///     leave_hours: Decimal::ZERO,
///     worked_hours: Decimal::new(85, 1),
///     meal_deduction: Decimal::ONE,
///     implicit_absence: false,
///     late_minutes: None,
///     remark: String::new(),
///     warnings: vec![],
/// };
/// assert_eq!(detect_lateness(&record, &WorkHoursConfig::default()), Some(12));
/// ```
pub fn detect_lateness(record: &DailyRecord, config: &WorkHoursConfig) -> Option<i64> {
    if !record.is_workday || record.leave_type != LeaveType::None || record.is_leave() {
        return None;
    }
    let clock_in = record.clock_in?;

    let start = i64::from(config.standard_start().hour()) * 60;
    let cutoff = i64::from(config.late_cutoff().hour()) * 60;
    let arrival = clock_in.minutes_from_day_start();

    (arrival > start && arrival < cutoff).then_some(arrival - start)
}
