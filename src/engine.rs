//! The month calculation pipeline.
//!
//! [`WorktimeEngine`] ties a source, the calendar, the rule parameters and the
//! leave classifier together: load rows, build records, keep the month's
//! dates in order, aggregate.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::calculation::{BuildContext, aggregate_month, build_daily_records};
use crate::calendar::HolidayCalendar;
use crate::config::WorkHoursConfig;
use crate::error::EngineResult;
use crate::models::{DailyRecord, LeaveClassifier, MonthStatistics, YearMonth};
use crate::source::AttendanceSource;

/// Computes month statistics from an attendance source.
///
/// The engine borrows everything it uses; build one per calculation from
/// shared state.
///
/// # Example
///
/// ```
/// use worktime_engine::calendar::HolidayCalendar;
/// use worktime_engine::config::WorkHoursConfig;
/// use worktime_engine::engine::WorktimeEngine;
/// use worktime_engine::models::{LeaveClassifier, RawDay};
/// use worktime_engine::source::MemoryAttendanceSource;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let source = MemoryAttendanceSource::new();
/// let march = "2025-03".parse().unwrap();
/// source.insert_month(march, vec![RawDay::for_date("2025-03-03").with_clock("9:00", "20:00")]);
///
/// let calendar = HolidayCalendar::new();
/// let config = WorkHoursConfig::default();
/// let classifier = LeaveClassifier::default();
/// let engine = WorktimeEngine::new(&source, &calendar, &config, &classifier);
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
/// let stats = engine.calculate_month(march, today).unwrap();
/// assert_eq!(stats.total_worked_hours, Decimal::new(95, 1));
/// assert_eq!(stats.remaining_workdays, 1);
/// ```
pub struct WorktimeEngine<'a> {
    source: &'a dyn AttendanceSource,
    calendar: &'a HolidayCalendar,
    config: &'a WorkHoursConfig,
    classifier: &'a LeaveClassifier,
}

impl<'a> WorktimeEngine<'a> {
    /// Creates an engine over borrowed parts.
    pub fn new(
        source: &'a dyn AttendanceSource,
        calendar: &'a HolidayCalendar,
        config: &'a WorkHoursConfig,
        classifier: &'a LeaveClassifier,
    ) -> Self {
        Self {
            source,
            calendar,
            config,
            classifier,
        }
    }

    /// Builds the month's daily records, ordered by date.
    ///
    /// Rows with unparseable dates and rows dated outside `year_month` are
    /// dropped. When a date appears more than once only its first row counts.
    pub fn daily_records(
        &self,
        year_month: YearMonth,
        reference_date: NaiveDate,
    ) -> EngineResult<Vec<DailyRecord>> {
        let rows = self.source.load_month(year_month)?;
        let context = BuildContext {
            calendar: self.calendar,
            config: self.config,
            classifier: self.classifier,
            reference_date,
        };

        let built = build_daily_records(&rows, &context);
        let skipped = rows.len() - built.len();

        let mut records: Vec<DailyRecord> = built
            .into_iter()
            .filter(|record| {
                let inside = year_month.contains(record.date);
                if !inside {
                    warn!(%year_month, date = %record.date, "Dropping record dated outside the month");
                }
                inside
            })
            .collect();
        // Stable sort, so the first row of a repeated date is the one kept
        records.sort_by_key(|record| record.date);
        records.dedup_by(|later, kept| {
            let duplicate = later.date == kept.date;
            if duplicate {
                warn!(%year_month, date = %later.date, "Ignoring repeated row for date");
            }
            duplicate
        });

        if skipped > 0 {
            warn!(%year_month, skipped, "Rows skipped for unparseable dates");
        }
        Ok(records)
    }

    /// Computes the statistics for `year_month` as seen on `reference_date`.
    pub fn calculate_month(
        &self,
        year_month: YearMonth,
        reference_date: NaiveDate,
    ) -> EngineResult<MonthStatistics> {
        let records = self.daily_records(year_month, reference_date)?;
        let statistics = aggregate_month(
            year_month,
            records,
            reference_date,
            self.calendar,
            self.config,
        );

        info!(
            %year_month,
            %reference_date,
            total_worked_hours = %statistics.total_worked_hours,
            attendance_days = statistics.attendance_days,
            remaining_workdays = statistics.remaining_workdays,
            "Month statistics calculated"
        );
        Ok(statistics)
    }
}
