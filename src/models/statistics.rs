//! Month-level attendance statistics.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{DailyRecord, YearMonth};

/// Aggregated statistics for one month.
///
/// Hour figures are rounded to two decimal places; the per-day records keep
/// their unrounded values. The struct owns every record of the month plus
/// the leave and late subsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStatistics {
    /// The month these statistics cover.
    pub year_month: YearMonth,
    /// The "today" used for remaining-workday projection.
    pub reference_date: NaiveDate,
    /// Sum of worked hours over attended days.
    pub total_worked_hours: Decimal,
    /// Days with worked hours above zero.
    pub attendance_days: u32,
    /// Average worked hours per attended day.
    pub average_worked_hours_per_attendance_day: Decimal,
    /// The configured monthly target.
    pub expected_total_hours: Decimal,
    /// Target minus worked hours; negative once the target is exceeded.
    pub remaining_hours_to_target: Decimal,
    /// Workdays from the reference date (inclusive) to month end.
    pub remaining_workdays: u32,
    /// Hours per remaining workday needed to reach the target.
    pub required_average_hours_for_remaining_days: Decimal,
    /// Sum of leave hours.
    pub total_leave_hours: Decimal,
    /// Days with leave hours above zero.
    pub leave_days: u32,
    /// Days whose clock-out was after the late-night hour.
    pub late_night_checkin_count: u32,
    /// Workdays with at least one punch.
    pub actual_attendance_days: u32,
    /// Days counted as late.
    pub late_days: u32,
    /// Every record of the month, ordered by date.
    pub daily_records: Vec<DailyRecord>,
    /// Records with leave hours.
    pub leave_records: Vec<DailyRecord>,
    /// Records counted as late.
    pub late_records: Vec<DailyRecord>,
}

impl MonthStatistics {
    /// Late days as a percentage of actual attendance days, one decimal place.
    pub fn late_rate_percent(&self) -> Decimal {
        if self.actual_attendance_days == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.late_days) * Decimal::ONE_HUNDRED
            / Decimal::from(self.actual_attendance_days))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }
}
