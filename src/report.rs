//! Plain-text month report.
//!
//! Renders [`MonthStatistics`] as the human-readable summary served by the
//! report endpoint. Hours print with two decimals, days as integers.

use std::fmt;

use crate::config::WorkHoursConfig;
use crate::models::{ClockTime, DailyRecord, MonthStatistics};

const BANNER_WIDTH: usize = 60;
const NOT_PUNCHED: &str = "未打卡";

/// A printable month report.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::aggregate_month;
/// use worktime_engine::calendar::HolidayCalendar;
/// use worktime_engine::config::WorkHoursConfig;
/// use worktime_engine::report::MonthReport;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::new();
/// let config = WorkHoursConfig::default();
/// let stats = aggregate_month(
///     "2025-03".parse().unwrap(),
///     vec![],
///     NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
///     &calendar,
///     &config,
/// );
///
/// let text = MonthReport::new(&stats, &config).to_string();
/// assert!(text.contains("2025-03 工时统计报告"));
/// assert!(text.contains("本月已结束"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MonthReport<'a> {
    statistics: &'a MonthStatistics,
    config: &'a WorkHoursConfig,
}

impl<'a> MonthReport<'a> {
    /// Creates a report over computed statistics.
    pub fn new(statistics: &'a MonthStatistics, config: &'a WorkHoursConfig) -> Self {
        Self { statistics, config }
    }

    fn write_attendance(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.statistics;
        writeln!(f, "【出勤统计】")?;
        writeln!(f, "  当月总工时：{:.2} 小时", s.total_worked_hours)?;
        writeln!(f, "  出勤天数：{} 天", s.attendance_days)?;
        writeln!(
            f,
            "  出勤日平均工时：{:.2} 小时/天",
            s.average_worked_hours_per_attendance_day
        )?;
        writeln!(f)?;

        writeln!(f, "【期望目标】")?;
        writeln!(f, "  期望总工时：{:.2} 小时", s.expected_total_hours)?;
        writeln!(f, "  距离目标还需：{:.2} 小时", s.remaining_hours_to_target)?;
        writeln!(f)?;

        writeln!(f, "【剩余规划】")?;
        writeln!(f, "  剩余工作日：{} 天", s.remaining_workdays)?;
        if s.remaining_workdays > 0 {
            writeln!(
                f,
                "  需要日均工时：{:.2} 小时/天",
                s.required_average_hours_for_remaining_days
            )?;
        } else {
            writeln!(f, "  本月已结束")?;
        }
        writeln!(f)
    }

    fn write_leave(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.statistics;
        if s.leave_days == 0 {
            return Ok(());
        }

        writeln!(f, "【请假统计】")?;
        writeln!(f, "  请假天数：{} 天", s.leave_days)?;
        writeln!(f, "  请假总时长：{:.2} 小时", s.total_leave_hours)?;
        writeln!(f)?;
        writeln!(f, "  请假明细：")?;
        for record in &s.leave_records {
            write!(f, "    - {}", record.date)?;
            if let (Some(start), Some(end)) = (record.leave_start, record.leave_end) {
                write!(f, " [{}~{}]", start, end)?;
            }
            if record.has_clock_event() {
                write!(
                    f,
                    " (打卡: {}~{})",
                    punch(record.clock_in),
                    punch(record.clock_out)
                )?;
            }
            write!(f, ": {:.2} 小时", record.leave_hours)?;
            if record.implicit_absence {
                write!(f, " (未标注缺勤)")?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }

    fn write_lateness(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.statistics;
        if s.late_days == 0 {
            return Ok(());
        }

        writeln!(f, "【迟到统计】")?;
        writeln!(f, "  迟到天数：{} 天", s.late_days)?;
        writeln!(f, "  迟到率：{:.1}%", s.late_rate_percent())?;
        writeln!(f, "  标准上班时间：{:02}:00", self.config.standard_start_hour)?;
        writeln!(f)?;
        writeln!(f, "  迟到明细：")?;
        for record in &s.late_records {
            write_late_line(f, record)?;
        }
        writeln!(f)
    }
}

fn write_late_line(f: &mut fmt::Formatter<'_>, record: &DailyRecord) -> fmt::Result {
    writeln!(
        f,
        "    - {} {}：上班 {} (迟到 {} 分钟), 下班 {}, 工时 {:.2}h",
        record.date,
        record.weekday,
        punch(record.clock_in),
        record.late_minutes.unwrap_or_default(),
        punch(record.clock_out),
        record.worked_hours
    )
}

fn punch(clock: Option<ClockTime>) -> String {
    clock.map_or_else(|| NOT_PUNCHED.to_string(), |c| c.to_string())
}

impl fmt::Display for MonthReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = "=".repeat(BANNER_WIDTH);
        writeln!(f, "{}", banner)?;
        writeln!(f, "           {} 工时统计报告", self.statistics.year_month)?;
        writeln!(f, "{}", banner)?;
        writeln!(f)?;

        self.write_attendance(f)?;
        self.write_leave(f)?;
        self.write_lateness(f)?;

        writeln!(f, "{}", banner)
    }
}

/// Renders the month report as text.
pub fn render_report(statistics: &MonthStatistics, config: &WorkHoursConfig) -> String {
    MonthReport::new(statistics, config).to_string()
}
