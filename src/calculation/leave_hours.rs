//! Leave hour calculation.
//!
//! Converts a classified [`LeaveType`] into the number of leave hours it
//! represents. Half and full days use the configured amounts; custom leave
//! uses the length of its explicit time range.

use rust_decimal::Decimal;

use crate::config::WorkHoursConfig;
use crate::models::{ClockTime, LeaveType};

use super::work_hours::hours_from_minutes;

/// The result of a leave hour calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveHoursResult {
    /// Leave hours for the day (never negative).
    pub hours: Decimal,
    /// Set when a custom range was missing a side or ended at or before its start.
    pub degenerate: bool,
}

impl LeaveHoursResult {
    fn of(hours: Decimal) -> Self {
        Self {
            hours,
            degenerate: false,
        }
    }
}

/// Calculates the leave hours of a day.
///
/// | Leave type | Hours |
/// |------------|-------|
/// | `None` | 0 |
/// | `Morning`, `Afternoon` | `half_day_leave_hours` |
/// | `FullDay` | `full_day_leave_hours` |
/// | `Custom` | `end - start`, or 0 if degenerate |
///
/// A custom range whose end carries a next-day marker spans midnight.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::calculate_leave_hours;
/// use worktime_engine::config::WorkHoursConfig;
/// use worktime_engine::models::{ClockTime, LeaveType};
/// use rust_decimal::Decimal;
///
/// let config = WorkHoursConfig::default();
/// let result = calculate_leave_hours(
///     LeaveType::Custom,
///     ClockTime::at(14, 0),
///     ClockTime::at(16, 30),
///     &config,
/// );
/// assert_eq!(result.hours, Decimal::new(25, 1));
/// assert!(!result.degenerate);
/// ```
pub fn calculate_leave_hours(
    leave_type: LeaveType,
    start: Option<ClockTime>,
    end: Option<ClockTime>,
    config: &WorkHoursConfig,
) -> LeaveHoursResult {
    match leave_type {
        LeaveType::None => LeaveHoursResult::of(Decimal::ZERO),
        LeaveType::Morning | LeaveType::Afternoon => {
            LeaveHoursResult::of(config.half_day_leave_hours)
        }
        LeaveType::FullDay => LeaveHoursResult::of(config.full_day_leave_hours),
        LeaveType::Custom => match (start, end) {
            (Some(start), Some(end)) => {
                let minutes = end.minutes_from_day_start() - start.minutes_from_day_start();
                if minutes > 0 {
                    LeaveHoursResult::of(hours_from_minutes(minutes))
                } else {
                    LeaveHoursResult {
                        hours: Decimal::ZERO,
                        degenerate: true,
                    }
                }
            }
            _ => LeaveHoursResult {
                hours: Decimal::ZERO,
                degenerate: true,
            },
        },
    }
}
