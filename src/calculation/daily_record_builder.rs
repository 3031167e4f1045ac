//! Daily record construction.
//!
//! Turns one [`RawDay`] into a [`DailyRecord`]: parses the date and punches,
//! classifies leave, applies the calendar and computes the hour figures.
//! Bad fields degrade to absent values with a [`RecordWarning`]; only an
//! unparseable date drops the row.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calendar::{HolidayCalendar, is_workday, weekday_name};
use crate::config::WorkHoursConfig;
use crate::models::{
    ClockTime, DailyRecord, LeaveClassifier, LeaveType, RawDay, RecordWarning, WarningCode,
};

use super::lateness::detect_lateness;
use super::leave_hours::calculate_leave_hours;
use super::work_hours::calculate_worked_hours;

/// Everything a record build needs besides the row itself.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Holiday and makeup-workday sets.
    pub calendar: &'a HolidayCalendar,
    /// Rule parameters.
    pub config: &'a WorkHoursConfig,
    /// Leave annotation table.
    pub classifier: &'a LeaveClassifier,
    /// "Today"; implicit absence only applies strictly before it.
    pub reference_date: NaiveDate,
}

/// Builds the record for one input row.
///
/// Returns `None` if the date cannot be parsed. Every other problem leaves
/// the record in place with a warning attached.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::{BuildContext, build_daily_record};
/// use worktime_engine::calendar::HolidayCalendar;
/// use worktime_engine::config::WorkHoursConfig;
/// use worktime_engine::models::{LeaveClassifier, RawDay};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let calendar = HolidayCalendar::new();
/// let config = WorkHoursConfig::default();
/// let classifier = LeaveClassifier::default();
/// let context = BuildContext {
///     calendar: &calendar,
///     config: &config,
///     classifier: &classifier,
///     reference_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
/// };
///
/// let row = RawDay::for_date("2025-03-03").with_clock("9:00", "20:00");
/// let record = build_daily_record(&row, &context).unwrap();
/// assert_eq!(record.weekday, "星期一");
/// assert_eq!(record.worked_hours, Decimal::new(95, 1));
/// ```
pub fn build_daily_record(raw: &RawDay, context: &BuildContext<'_>) -> Option<DailyRecord> {
    let Some(date) = raw.parsed_date() else {
        warn!(date = %raw.date, "Skipping row with unparseable date");
        return None;
    };

    let mut warnings = Vec::new();
    let clock_in = parse_clock(date, "clock_in", &raw.clock_in, &mut warnings);
    let clock_out = parse_clock(date, "clock_out", &raw.clock_out, &mut warnings);
    let leave_start = parse_clock(date, "leave_start", &raw.leave_start, &mut warnings);
    let leave_end = parse_clock(date, "leave_end", &raw.leave_end, &mut warnings);

    let leave_type = context
        .classifier
        .classify(&raw.leave_type, leave_start.is_some() && leave_end.is_some());
    let (leave_start, leave_end) = if leave_type == LeaveType::Custom {
        (leave_start, leave_end)
    } else {
        (None, None)
    };

    let is_holiday = context.calendar.is_holiday(date);
    let is_makeup_workday = context.calendar.is_makeup_workday(date);
    let is_workday = is_workday(date, context.calendar);

    let leave = calculate_leave_hours(leave_type, leave_start, leave_end, context.config);
    if leave.degenerate {
        warn!(%date, leave_start = ?leave_start, leave_end = ?leave_end, "Degenerate custom leave range");
        warnings.push(RecordWarning::new(
            WarningCode::DegenerateLeaveRange,
            "leave_end",
            "custom leave range is missing a side or does not end after it starts",
        ));
    }
    let mut leave_hours = leave.hours;

    // A punch that failed to parse is not evidence of absence
    let punch_unreadable = warnings
        .iter()
        .any(|w| w.code == WarningCode::FieldParseDegraded);
    let mut implicit_absence = false;
    if context.config.implicit_absence_enabled
        && is_workday
        && date < context.reference_date
        && clock_in.is_none()
        && clock_out.is_none()
        && leave_type == LeaveType::None
        && !punch_unreadable
    {
        debug!(%date, "Counting missed workday as full-day absence");
        leave_hours = context.config.full_day_leave_hours;
        implicit_absence = true;
    }

    let (worked_hours, meal_deduction) = match (clock_in, clock_out) {
        (Some(clock_in), Some(clock_out)) => {
            let result = calculate_worked_hours(clock_in, clock_out, leave_type, context.config);
            if result.degenerate {
                warn!(%date, %clock_in, %clock_out, "Clock-out precedes clock-in");
                warnings.push(RecordWarning::new(
                    WarningCode::DegenerateClockRange,
                    "clock_out",
                    format!("clock-out {} precedes clock-in {}", clock_out, clock_in),
                ));
            }
            (result.worked_hours, result.meal_deduction)
        }
        _ => (Decimal::ZERO, Decimal::ZERO),
    };

    let mut record = DailyRecord {
        date,
        weekday: weekday_name(date.weekday()).to_string(),
        clock_in,
        clock_out,
        is_workday,
        is_holiday,
        is_makeup_workday,
        leave_type,
        leave_start,
        leave_end,
        leave_hours,
        worked_hours,
        meal_deduction,
        implicit_absence,
        late_minutes: None,
        remark: raw.remark.trim().to_string(),
        warnings,
    };
    record.late_minutes = detect_lateness(&record, context.config);

    Some(record)
}

/// Builds records for every row, dropping rows with unparseable dates.
pub fn build_daily_records(rows: &[RawDay], context: &BuildContext<'_>) -> Vec<DailyRecord> {
    rows.iter()
        .filter_map(|row| build_daily_record(row, context))
        .collect()
}

fn parse_clock(
    date: NaiveDate,
    field: &'static str,
    raw: &str,
    warnings: &mut Vec<RecordWarning>,
) -> Option<ClockTime> {
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse::<ClockTime>() {
        Ok(clock) => Some(clock),
        Err(e) => {
            warn!(%date, field, value = raw, "Treating unparseable clock time as absent");
            warnings.push(RecordWarning::new(
                WarningCode::FieldParseDegraded,
                field,
                e.to_string(),
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct Fixture {
        calendar: HolidayCalendar,
        config: WorkHoursConfig,
        classifier: LeaveClassifier,
        reference_date: NaiveDate,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                calendar: HolidayCalendar::new(),
                config: WorkHoursConfig::default(),
                classifier: LeaveClassifier::default(),
                reference_date: make_date("2025-03-31"),
            }
        }

        fn with_implicit_absence(mut self) -> Self {
            self.config.implicit_absence_enabled = true;
            self
        }

        fn context(&self) -> BuildContext<'_> {
            BuildContext {
                calendar: &self.calendar,
                config: &self.config,
                classifier: &self.classifier,
                reference_date: self.reference_date,
            }
        }

        fn build(&self, row: RawDay) -> Option<DailyRecord> {
            build_daily_record(&row, &self.context())
        }
    }

    #[test]
    fn test_regular_day() {
        let fixture = Fixture::new();
        let record = fixture
            .build(RawDay::for_date("2025-03-04").with_clock("9:00", "18:30"))
            .unwrap();

        assert_eq!(record.date, make_date("2025-03-04"));
        assert_eq!(record.weekday, "星期二");
        assert!(record.is_workday);
        assert!(!record.is_holiday);
        assert_eq!(record.leave_type, LeaveType::None);
        assert_eq!(record.worked_hours, dec("8.5"));
        assert_eq!(record.meal_deduction, dec("1"));
        assert_eq!(record.late_minutes, None);
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn test_unparseable_date_is_skipped() {
        let fixture = Fixture::new();
        assert!(fixture.build(RawDay::for_date("2025-13-45")).is_none());
        assert!(fixture.build(RawDay::for_date("not a date")).is_none());
        assert!(fixture.build(RawDay::for_date("")).is_none());
    }

    #[test]
    fn test_slash_dates_are_accepted() {
        let fixture = Fixture::new();
        let record = fixture.build(RawDay::for_date("2025/03/04")).unwrap();
        assert_eq!(record.date, make_date("2025-03-04"));
    }

    #[test]
    fn test_unparseable_clock_in_is_kept_as_absent() {
        let fixture = Fixture::new();
        let record = fixture
            .build(RawDay::for_date("2025-03-04").with_clock("abc", "18:00"))
            .unwrap();

        assert_eq!(record.clock_in, None);
        assert_eq!(record.clock_out, ClockTime::at(18, 0));
        assert_eq!(record.worked_hours, Decimal::ZERO);
        assert_eq!(record.warnings.len(), 1);
        assert_eq!(record.warnings[0].code, WarningCode::FieldParseDegraded);
        assert_eq!(record.warnings[0].field, "clock_in");
    }

    #[test]
    fn test_empty_clock_is_silently_absent() {
        let fixture = Fixture::new();
        let record = fixture
            .build(RawDay::for_date("2025-03-04").with_clock("  ", ""))
            .unwrap();
        assert!(!record.has_clock_event());
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn test_full_day_leave_ignores_times() {
        let fixture = Fixture::new();
        let record = fixture
            .build(
                RawDay::for_date("2025-03-05")
                    .with_leave("全天请假")
                    .with_leave_range("10:00", "11:00"),
            )
            .unwrap();
        assert_eq!(record.leave_type, LeaveType::FullDay);
        assert_eq!(record.leave_hours, dec("8"));
        assert_eq!(record.leave_start, None);
        assert_eq!(record.leave_end, None);
    }

    #[test]
    fn test_afternoon_leave_with_punches() {
        let fixture = Fixture::new();
        let record = fixture
            .build(
                RawDay::for_date("2025-03-05")
                    .with_clock("9:00", "20:00")
                    .with_leave("下午请假"),
            )
            .unwrap();
        assert_eq!(record.leave_hours, dec("4"));
        assert_eq!(record.worked_hours, dec("11"));
    }

    #[test]
    fn test_unlabelled_time_range_is_custom_leave() {
        let fixture = Fixture::new();
        let record = fixture
            .build(
                RawDay::for_date("2025-03-05")
                    .with_clock("9:00", "18:00")
                    .with_leave_range("14:00", "15:30"),
            )
            .unwrap();
        assert_eq!(record.leave_type, LeaveType::Custom);
        assert_eq!(record.leave_hours, dec("1.5"));
        assert_eq!(record.leave_start, ClockTime::at(14, 0));
    }

    #[test]
    fn test_degenerate_custom_range_warns() {
        let fixture = Fixture::new();
        let record = fixture
            .build(
                RawDay::for_date("2025-03-05")
                    .with_leave("自定义时间段")
                    .with_leave_range("15:00", "14:00"),
            )
            .unwrap();
        assert_eq!(record.leave_type, LeaveType::Custom);
        assert_eq!(record.leave_hours, Decimal::ZERO);
        assert!(
            record
                .warnings
                .iter()
                .any(|w| w.code == WarningCode::DegenerateLeaveRange)
        );
    }

    #[test]
    fn test_reversed_punches_warn() {
        let fixture = Fixture::new();
        let record = fixture
            .build(RawDay::for_date("2025-03-05").with_clock("18:00", "9:00"))
            .unwrap();
        assert_eq!(record.worked_hours, Decimal::ZERO);
        assert_eq!(record.warnings[0].code, WarningCode::DegenerateClockRange);
    }

    #[test]
    fn test_calendar_flags() {
        let fixture = Fixture::new();
        fixture.calendar.add_holiday(make_date("2025-04-04"));
        fixture.calendar.add_makeup_workday(make_date("2025-04-27"));

        let holiday = fixture.build(RawDay::for_date("2025-04-04")).unwrap();
        assert!(holiday.is_holiday);
        assert!(!holiday.is_workday);

        let makeup = fixture.build(RawDay::for_date("2025-04-27")).unwrap();
        assert!(makeup.is_makeup_workday);
        assert!(makeup.is_workday);
        assert_eq!(makeup.weekday, "星期日");
    }

    #[test]
    fn test_late_arrival_is_recorded() {
        let fixture = Fixture::new();
        let record = fixture
            .build(RawDay::for_date("2025-03-06").with_clock("9:25", "18:30"))
            .unwrap();
        assert_eq!(record.late_minutes, Some(25));
    }

    #[test]
    fn test_implicit_absence_disabled_by_default() {
        let fixture = Fixture::new();
        let record = fixture.build(RawDay::for_date("2025-03-04")).unwrap();
        assert_eq!(record.leave_hours, Decimal::ZERO);
        assert!(!record.implicit_absence);
    }

    #[test]
    fn test_implicit_absence_on_missed_past_workday() {
        let fixture = Fixture::new().with_implicit_absence();
        let record = fixture.build(RawDay::for_date("2025-03-04")).unwrap();
        assert_eq!(record.leave_hours, dec("8"));
        assert!(record.implicit_absence);
    }

    #[test]
    fn test_implicit_absence_skips_reference_date_and_weekends() {
        let fixture = Fixture::new().with_implicit_absence();

        let today = fixture.build(RawDay::for_date("2025-03-31")).unwrap();
        assert!(!today.implicit_absence);

        let saturday = fixture.build(RawDay::for_date("2025-03-08")).unwrap();
        assert!(!saturday.implicit_absence);
        assert_eq!(saturday.leave_hours, Decimal::ZERO);
    }

    #[test]
    fn test_explicit_leave_suppresses_implicit_absence() {
        let fixture = Fixture::new().with_implicit_absence();

        let morning = fixture
            .build(RawDay::for_date("2025-03-04").with_leave("上午请假"))
            .unwrap();
        assert_eq!(morning.leave_hours, dec("4"));
        assert!(!morning.implicit_absence);

        let degenerate = fixture
            .build(
                RawDay::for_date("2025-03-04")
                    .with_leave("custom")
                    .with_leave_range("15:00", "14:00"),
            )
            .unwrap();
        assert_eq!(degenerate.leave_hours, Decimal::ZERO);
        assert!(!degenerate.implicit_absence);
    }

    #[test]
    fn test_single_punch_suppresses_implicit_absence() {
        let fixture = Fixture::new().with_implicit_absence();
        let record = fixture
            .build(RawDay::for_date("2025-03-04").with_clock("9:00", ""))
            .unwrap();
        assert!(!record.implicit_absence);
    }

    #[test]
    fn test_unreadable_punches_suppress_implicit_absence() {
        let fixture = Fixture::new().with_implicit_absence();
        let record = fixture
            .build(RawDay::for_date("2025-03-04").with_clock("9;00", "18.00"))
            .unwrap();

        assert!(record.clock_in.is_none());
        assert!(record.clock_out.is_none());
        assert_eq!(record.warnings.len(), 2);
        assert!(!record.implicit_absence);
        assert_eq!(record.leave_hours, Decimal::ZERO);
    }

    #[test]
    fn test_build_daily_records_drops_bad_dates() {
        let fixture = Fixture::new();
        let rows = vec![
            RawDay::for_date("2025-03-03"),
            RawDay::for_date("garbage"),
            RawDay::for_date("2025-03-04"),
        ];
        let records = build_daily_records(&rows, &fixture.context());
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_remark_is_trimmed() {
        let fixture = Fixture::new();
        let record = fixture
            .build(RawDay::for_date("2025-03-04").with_remark("  出差  "))
            .unwrap();
        assert_eq!(record.remark, "出差");
    }
}
