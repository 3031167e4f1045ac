//! Month-level aggregation.
//!
//! Folds a month of [`DailyRecord`]s into [`MonthStatistics`]: totals,
//! averages, the projection against the monthly target, leave and lateness
//! summaries. Hour outputs are rounded here and nowhere else.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::calendar::{HolidayCalendar, is_workday};
use crate::config::WorkHoursConfig;
use crate::models::{DailyRecord, MonthStatistics, YearMonth};

/// Decimal places kept in aggregated hour figures.
pub const HOURS_DECIMAL_PLACES: u32 = 2;

/// Rounds an hour figure to two decimals, midpoints away from zero.
pub fn round_hours(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(HOURS_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Counts the workdays left in the month, the reference date included.
///
/// Counting starts at the later of the reference date and the first of the
/// month. A reference date past the month end leaves nothing to count.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::count_remaining_workdays;
/// use worktime_engine::calendar::HolidayCalendar;
/// use worktime_engine::models::YearMonth;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::new();
/// let march: YearMonth = "2025-03".parse().unwrap();
///
/// // Monday 2025-03-31 is the last day of the month
/// let last_day = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
/// assert_eq!(count_remaining_workdays(march, last_day, &calendar), 1);
/// ```
pub fn count_remaining_workdays(
    year_month: YearMonth,
    reference_date: NaiveDate,
    calendar: &HolidayCalendar,
) -> u32 {
    let start = reference_date.max(year_month.first_day());
    count_u32(
        year_month
            .days()
            .filter(|date| *date >= start && is_workday(*date, calendar))
            .count(),
    )
}

/// Aggregates one month of records.
///
/// `records` should already be restricted to `year_month` and ordered by
/// date; they are stored in the result as given. The function is pure:
/// identical inputs always produce identical statistics.
pub fn aggregate_month(
    year_month: YearMonth,
    records: Vec<DailyRecord>,
    reference_date: NaiveDate,
    calendar: &HolidayCalendar,
    config: &WorkHoursConfig,
) -> MonthStatistics {
    let attended: Vec<&DailyRecord> = records.iter().filter(|r| r.is_attended()).collect();
    let total_worked: Decimal = attended.iter().map(|r| r.worked_hours).sum();
    let attendance_days = count_u32(attended.len());

    let average = if attendance_days > 0 {
        total_worked / Decimal::from(attendance_days)
    } else {
        Decimal::ZERO
    };

    let expected_total_hours = config.expected_total_hours;
    let remaining_hours = expected_total_hours - total_worked;
    let remaining_workdays = count_remaining_workdays(year_month, reference_date, calendar);
    let required_average = if remaining_workdays > 0 {
        remaining_hours / Decimal::from(remaining_workdays)
    } else {
        Decimal::ZERO
    };

    let leave_records: Vec<DailyRecord> =
        records.iter().filter(|r| r.is_leave()).cloned().collect();
    let total_leave: Decimal = leave_records.iter().map(|r| r.leave_hours).sum();

    let late_night_threshold = config.late_night_threshold();
    let late_night_checkin_count = count_u32(
        records
            .iter()
            .filter(|r| r.clock_out.is_some_and(|out| out.is_after(late_night_threshold)))
            .count(),
    );

    let actual_attendance_days = count_u32(
        records
            .iter()
            .filter(|r| r.is_workday && r.has_clock_event())
            .count(),
    );

    let late_records: Vec<DailyRecord> =
        records.iter().filter(|r| r.is_late()).cloned().collect();

    debug!(
        %year_month,
        %reference_date,
        attendance_days,
        remaining_workdays,
        late_days = late_records.len(),
        "Aggregated month"
    );

    MonthStatistics {
        year_month,
        reference_date,
        total_worked_hours: round_hours(total_worked),
        attendance_days,
        average_worked_hours_per_attendance_day: round_hours(average),
        expected_total_hours: round_hours(expected_total_hours),
        remaining_hours_to_target: round_hours(remaining_hours),
        remaining_workdays,
        required_average_hours_for_remaining_days: round_hours(required_average),
        total_leave_hours: round_hours(total_leave),
        leave_days: count_u32(leave_records.len()),
        late_night_checkin_count,
        actual_attendance_days,
        late_days: count_u32(late_records.len()),
        daily_records: records,
        leave_records,
        late_records,
    }
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{BuildContext, build_daily_records};
    use crate::models::{LeaveClassifier, RawDay};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn march() -> YearMonth {
        "2025-03".parse().unwrap()
    }

    fn build(
        rows: &[RawDay],
        calendar: &HolidayCalendar,
        config: &WorkHoursConfig,
        reference_date: NaiveDate,
    ) -> Vec<DailyRecord> {
        let classifier = LeaveClassifier::default();
        let context = BuildContext {
            calendar,
            config,
            classifier: &classifier,
            reference_date,
        };
        build_daily_records(rows, &context)
    }

    fn sample_rows() -> Vec<RawDay> {
        vec![
            // Monday, 8.5h
            RawDay::for_date("2025-03-03").with_clock("9:00", "18:30"),
            // Tuesday, late by 20 minutes, 10h
            RawDay::for_date("2025-03-04").with_clock("9:20", "20:50"),
            // Wednesday, afternoon leave, 3h
            RawDay::for_date("2025-03-05")
                .with_clock("9:00", "12:00")
                .with_leave("下午请假"),
            // Thursday, full-day leave
            RawDay::for_date("2025-03-06").with_leave("全天请假"),
            // Friday, past midnight, 14.5h
            RawDay::for_date("2025-03-07").with_clock("9:00", "01:00+1"),
            // Saturday, no punches
            RawDay::for_date("2025-03-08"),
        ]
    }

    #[test]
    fn test_aggregates_sample_week() {
        let calendar = HolidayCalendar::new();
        let config = WorkHoursConfig::default();
        let reference_date = make_date("2025-03-10");
        let records = build(&sample_rows(), &calendar, &config, reference_date);

        let stats = aggregate_month(march(), records, reference_date, &calendar, &config);

        assert_eq!(stats.total_worked_hours, dec("36.00"));
        assert_eq!(stats.attendance_days, 4);
        assert_eq!(stats.average_worked_hours_per_attendance_day, dec("9.00"));
        assert_eq!(stats.expected_total_hours, dec("220"));
        assert_eq!(stats.remaining_hours_to_target, dec("184.00"));
        // 2025-03-10 (Mon) through 2025-03-31 (Mon): 16 workdays
        assert_eq!(stats.remaining_workdays, 16);
        assert_eq!(stats.required_average_hours_for_remaining_days, dec("11.50"));
        assert_eq!(stats.total_leave_hours, dec("12"));
        assert_eq!(stats.leave_days, 2);
        assert_eq!(stats.late_night_checkin_count, 1);
        assert_eq!(stats.actual_attendance_days, 4);
        assert_eq!(stats.late_days, 1);
        assert_eq!(stats.late_records[0].late_minutes, Some(20));
        assert_eq!(stats.daily_records.len(), 6);
    }

    #[test]
    fn test_total_is_rounded_sum_of_daily_hours() {
        let calendar = HolidayCalendar::new();
        let config = WorkHoursConfig::default();
        let reference_date = make_date("2025-03-31");
        let rows = vec![
            RawDay::for_date("2025-03-03").with_clock("9:00", "18:20"),
            RawDay::for_date("2025-03-04").with_clock("9:00", "18:20"),
            RawDay::for_date("2025-03-05").with_clock("9:00", "18:20"),
        ];
        let records = build(&rows, &calendar, &config, reference_date);
        let unrounded: Decimal = records.iter().map(|r| r.worked_hours).sum();

        let stats = aggregate_month(march(), records, reference_date, &calendar, &config);
        assert_eq!(stats.total_worked_hours, round_hours(unrounded));
        assert_eq!(stats.total_worked_hours, dec("25.00"));
    }

    #[test]
    fn test_empty_month() {
        let calendar = HolidayCalendar::new();
        let config = WorkHoursConfig::default();
        let stats = aggregate_month(march(), vec![], make_date("2025-03-01"), &calendar, &config);

        assert_eq!(stats.total_worked_hours, Decimal::ZERO);
        assert_eq!(stats.attendance_days, 0);
        assert_eq!(stats.average_worked_hours_per_attendance_day, Decimal::ZERO);
        assert_eq!(stats.remaining_hours_to_target, dec("220"));
        assert_eq!(stats.remaining_workdays, 21);
        assert_eq!(stats.late_rate_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_month_over_has_no_remaining_days() {
        let calendar = HolidayCalendar::new();
        let config = WorkHoursConfig::default();
        let stats = aggregate_month(march(), vec![], make_date("2025-04-02"), &calendar, &config);
        assert_eq!(stats.remaining_workdays, 0);
        assert_eq!(stats.required_average_hours_for_remaining_days, Decimal::ZERO);
    }

    #[test]
    fn test_remaining_workdays_inclusive_of_reference_date() {
        let calendar = HolidayCalendar::new();
        assert_eq!(count_remaining_workdays(march(), make_date("2025-03-31"), &calendar), 1);
        // Saturday the 29th: only Monday the 31st remains
        assert_eq!(count_remaining_workdays(march(), make_date("2025-03-29"), &calendar), 1);
    }

    #[test]
    fn test_remaining_workdays_before_month_counts_whole_month() {
        let calendar = HolidayCalendar::new();
        assert_eq!(count_remaining_workdays(march(), make_date("2025-02-10"), &calendar), 21);
    }

    #[test]
    fn test_remaining_workdays_follow_calendar() {
        let calendar = HolidayCalendar::with_default_schedule().unwrap();
        let october: YearMonth = "2025-10".parse().unwrap();
        // Oct 1-8 holidays, Oct 11 makeup Saturday: 9, 10, 11, then 13-31 weekdays
        assert_eq!(count_remaining_workdays(october, make_date("2025-10-01"), &calendar), 18);
    }

    #[test]
    fn test_over_target_gives_negative_remaining() {
        let calendar = HolidayCalendar::new();
        let config = WorkHoursConfig {
            expected_total_hours: dec("10"),
            ..WorkHoursConfig::default()
        };
        let reference_date = make_date("2025-03-31");
        let rows = vec![RawDay::for_date("2025-03-03").with_clock("9:00", "01:00+1")];
        let records = build(&rows, &calendar, &config, reference_date);

        let stats = aggregate_month(march(), records, reference_date, &calendar, &config);
        assert_eq!(stats.remaining_hours_to_target, dec("-4.50"));
        assert_eq!(stats.required_average_hours_for_remaining_days, dec("-4.50"));
    }

    #[test]
    fn test_late_night_threshold_is_strict() {
        let calendar = HolidayCalendar::new();
        let config = WorkHoursConfig::default();
        let reference_date = make_date("2025-03-31");
        let rows = vec![
            RawDay::for_date("2025-03-03").with_clock("9:00", "21:00"),
            RawDay::for_date("2025-03-04").with_clock("9:00", "21:01"),
            RawDay::for_date("2025-03-05").with_clock("9:00", "0:10+1"),
        ];
        let records = build(&rows, &calendar, &config, reference_date);
        let stats = aggregate_month(march(), records, reference_date, &calendar, &config);
        assert_eq!(stats.late_night_checkin_count, 2);
    }

    #[test]
    fn test_weekend_punches_not_in_actual_attendance() {
        let calendar = HolidayCalendar::new();
        let config = WorkHoursConfig::default();
        let reference_date = make_date("2025-03-31");
        let rows = vec![
            RawDay::for_date("2025-03-08").with_clock("10:00", "15:00"),
            RawDay::for_date("2025-03-10").with_clock("9:00", ""),
        ];
        let records = build(&rows, &calendar, &config, reference_date);
        let stats = aggregate_month(march(), records, reference_date, &calendar, &config);
        assert_eq!(stats.attendance_days, 1);
        assert_eq!(stats.actual_attendance_days, 1);
    }

    #[test]
    fn test_implicit_absence_counts_once() {
        let calendar = HolidayCalendar::new();
        let config = WorkHoursConfig {
            implicit_absence_enabled: true,
            ..WorkHoursConfig::default()
        };
        let reference_date = make_date("2025-03-06");
        let rows = vec![
            RawDay::for_date("2025-03-03").with_leave("全天请假"),
            RawDay::for_date("2025-03-04"),
            RawDay::for_date("2025-03-05").with_leave("上午请假"),
            RawDay::for_date("2025-03-06"),
        ];
        let records = build(&rows, &calendar, &config, reference_date);
        let stats = aggregate_month(march(), records, reference_date, &calendar, &config);

        // 8 explicit + 8 implicit + 4 morning; the reference date is not absent yet
        assert_eq!(stats.total_leave_hours, dec("20"));
        assert_eq!(stats.leave_days, 3);
    }

    #[test]
    fn test_late_rate() {
        let calendar = HolidayCalendar::new();
        let config = WorkHoursConfig::default();
        let reference_date = make_date("2025-03-31");
        let rows = vec![
            RawDay::for_date("2025-03-03").with_clock("9:05", "18:00"),
            RawDay::for_date("2025-03-04").with_clock("9:00", "18:00"),
            RawDay::for_date("2025-03-05").with_clock("9:00", "18:00"),
        ];
        let records = build(&rows, &calendar, &config, reference_date);
        let stats = aggregate_month(march(), records, reference_date, &calendar, &config);
        assert_eq!(stats.late_rate_percent(), dec("33.3"));
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let calendar = HolidayCalendar::new();
        let config = WorkHoursConfig::default();
        let reference_date = make_date("2025-03-10");
        let records = build(&sample_rows(), &calendar, &config, reference_date);

        let first = aggregate_month(march(), records.clone(), reference_date, &calendar, &config);
        let second = aggregate_month(march(), records, reference_date, &calendar, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_hours_midpoint_away_from_zero() {
        assert_eq!(round_hours(dec("1.005")), dec("1.01"));
        assert_eq!(round_hours(dec("-1.005")), dec("-1.01"));
        assert_eq!(round_hours(dec("2.004")), dec("2.00"));
    }
}
